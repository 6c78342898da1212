use std::collections::HashSet;
use std::fmt;

/// Historical or variant school name → canonical name. No canonical name may
/// appear as an alias, which keeps [`canonical_school`] idempotent.
pub const SCHOOL_ALIASES: &[(&str, &str)] = &[
    ("Alabama-Heersink", "Alabama"),
    ("Heersink", "Alabama"),
    ("Heersink School", "Alabama"),
    ("Kaiser Permanente-Tyson", "Kaiser Permanente"),
    ("Central Florida", "UCF"),
    ("GRU MC Georgia", "MC Georgia Augusta"),
    ("MC Georgia", "MC Georgia Augusta"),
    ("Chicago Med-Franklin", "Chicago Med Franklin"),
    ("Massachusetts-Chan", "Massachusetts"),
    ("Mayo-Alix", "Mayo"),
    ("St Louis", "Saint Louis"),
    ("UMDNJ New Jersey", "Rutgers New Jersey"),
    ("UMDNJ-RW Johnson", "Rutgers-RW Johnson"),
    ("SHU-Hackensack Meridian", "Hackensack Meridian"),
    ("Nevada", "Nevada Reno"),
    ("Columbia", "Columbia-Vagelos"),
    ("Yeshiva Einstein", "Einstein"),
    ("Hofstra North Shore-LIJ", "Zucker Hofstra Northwell"),
    ("Hofstra Northwell", "Zucker Hofstra Northwell"),
    ("Stony Brook", "Renaissance Stony Brook"),
    ("Mount Sinai", "Mount Sinai-Icahn"),
    ("New York University", "NYU-Grossman"),
    ("Buffalo", "Buffalo-Jacobs"),
    ("Case Western", "Case Western Reserve"),
    ("Jefferson", "Jefferson-Kimmel"),
    ("Commonwealth", "Geisinger Commonwealth"),
    ("Temple", "Temple-Katz"),
    ("South Carolina", "South Carolina Columbia"),
    ("UT HSC San Antonio", "UT San Antonio-Long"),
    ("UT Houston", "UT Houston-McGovern"),
    ("Vermont", "Vermont-Larner"),
];

/// Removes footnote digits and surrounding whitespace from a school name.
pub fn strip_digits(name: &str) -> String {
    let stripped: String = name.chars().filter(|ch| !ch.is_ascii_digit()).collect();
    stripped.trim().to_string()
}

/// Full cleaning: digit stripping followed by a single alias lookup.
pub fn canonical_school(name: &str) -> String {
    let stripped = strip_digits(name);
    match SCHOOL_ALIASES.iter().find(|(alias, _)| *alias == stripped) {
        Some((_, canonical)) => (*canonical).to_string(),
        None => stripped,
    }
}

/// An alias in [`SCHOOL_ALIASES`] whose canonical name is absent from a
/// merged table. Usually a sign that the alias table has fallen behind the
/// source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMappingDrift {
    pub alias: &'static str,
    pub canonical: &'static str,
}

impl fmt::Display for NameMappingDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no school maps to '{}' (alias '{}')",
            self.canonical, self.alias
        )
    }
}

/// Reports every alias whose canonical name none of the cleaned names carry.
/// An alias that simply went unused in a year whose sheet already spells the
/// canonical name is not drift.
pub fn unmatched_aliases<'a, I>(cleaned_names: I) -> Vec<NameMappingDrift>
where
    I: IntoIterator<Item = &'a str>,
{
    let seen: HashSet<&str> = cleaned_names.into_iter().collect();
    SCHOOL_ALIASES
        .iter()
        .filter(|(_, canonical)| !seen.contains(canonical))
        .map(|&(alias, canonical)| NameMappingDrift { alias, canonical })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_footnote_digits() {
        assert_eq!(strip_digits("Heersink1"), "Heersink");
        assert_eq!(strip_digits("Hofstra Northwell 12"), "Hofstra Northwell");
        assert_eq!(strip_digits("Harvard"), "Harvard");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let samples = [
            "Alabama-Heersink2",
            "Columbia",
            "MC Georgia3",
            "Stanford",
            "UT Houston 4",
        ];
        for sample in samples {
            let once = canonical_school(sample);
            assert_eq!(canonical_school(&once), once, "{sample}");
        }
    }

    #[test]
    fn no_canonical_name_is_an_alias() {
        for (_, canonical) in SCHOOL_ALIASES {
            assert!(
                SCHOOL_ALIASES.iter().all(|(alias, _)| alias != canonical),
                "{canonical} is both alias and target"
            );
        }
    }

    #[test]
    fn drift_lists_aliases_with_absent_targets() {
        let drift = unmatched_aliases(["Columbia-Vagelos", "Harvard"]);
        assert_eq!(drift.len(), SCHOOL_ALIASES.len() - 1);
        assert!(drift.iter().all(|entry| entry.alias != "Columbia"));
    }

    #[test]
    fn present_target_silences_all_of_its_aliases() {
        let drift = unmatched_aliases(["Alabama"]);
        assert!(drift.iter().all(|entry| entry.canonical != "Alabama"));
        assert_eq!(drift.len(), SCHOOL_ALIASES.len() - 3);
    }
}
