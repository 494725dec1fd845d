//! Static category-code lookup table.
//!
//! Maps the 6-digit ÖNACE section codes used by the income dataset to their
//! display labels. Each label carries a trailing bracketed single-letter
//! section code, e.g. `"Bau <F>"`; [`split_label`] separates the two parts
//! for the comparison table.
//!
//! The table is process-wide constant data, initialized once and never
//! mutated.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Category code to bilingual display label.
pub static CATEGORY_LABELS: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (400001, "Land- und Forstwirtschaft; Fischerei <A>"),
        (400002, "Bergbau u.Gewinnung v.Steinen u.Erden <B>"),
        (400003, "Herstellung von Waren <C>"),
        (400004, "Energieversorgung <D>"),
        (400005, "Wasservers.-u.-entsorg.;Abfallentsorgung <E>"),
        (400006, "Bau <F>"),
        (400007, "Handel; Rep. und Instandh. von Kfz <G>"),
        (400008, "Verkehr und Lagerei <H>"),
        (400009, "Beherbergung und Gastronomie <I>"),
        (400010, "Information und Kommunikation <J>"),
        (400011, "Erbring.v.Finanz-u.Versicherungsleist. <K>"),
        (400012, "Grundstücks- und Wohnungswesen <L>"),
        (400013, "Erbring.v.freiberuf.,wissensch.,techn.DL <M>"),
        (400014, "Erbring.v.sonst. wirtschaftl.Dienstl. <N>"),
        (400015, "Öffentliche Verwalt., Sozialversicherung <O>"),
        (400016, "Erziehung und Unterricht <P>"),
        (400017, "Gesundheits- und Sozialwesen <Q>"),
        (400018, "Kunst, Unterhaltung und Erholung <R>"),
        (400019, "Erbringung v. sonstigen Dienstleistungen <S>"),
        (400020, "Private Haushalte <T>"),
        (400021, "Exterritoriale Organisationen <U>"),
    ])
});

/// Look up the display label for a category code.
pub fn label_for(code: u32) -> Option<&'static str> {
    CATEGORY_LABELS.get(&code).copied()
}

/// Split a display label into `(short_code, descriptive_name)`.
///
/// The short code is the content of the trailing angle brackets; the name is
/// the label with that annotation removed and trimmed. A label without the
/// annotation yields an empty short code and the full label as name.
pub fn split_label(label: &str) -> (String, String) {
    let trimmed = label.trim_end();
    if let Some(open) = trimmed.rfind('<') {
        if let Some(close) = trimmed[open..].find('>') {
            let short = trimmed[open + 1..open + close].to_string();
            let name = trimmed[..open].trim_end().to_string();
            return (short, name);
        }
    }
    (String::new(), trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete() {
        assert_eq!(CATEGORY_LABELS.len(), 21);
        for code in 400001..=400021 {
            assert!(label_for(code).is_some(), "missing label for {code}");
        }
    }

    #[test]
    fn test_unknown_code() {
        assert!(label_for(400000).is_none());
        assert!(label_for(999999).is_none());
    }

    #[test]
    fn test_split_label() {
        let (short, name) = split_label("Land- und Forstwirtschaft; Fischerei <A>");
        assert_eq!(short, "A");
        assert_eq!(name, "Land- und Forstwirtschaft; Fischerei");

        let (short, name) = split_label("Bau <F>");
        assert_eq!(short, "F");
        assert_eq!(name, "Bau");
    }

    #[test]
    fn test_split_label_without_annotation() {
        let (short, name) = split_label("Sonstige");
        assert_eq!(short, "");
        assert_eq!(name, "Sonstige");
    }
}
