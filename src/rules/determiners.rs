use rand::Rng;
use rand::seq::SliceRandom;

/// Semantic class of a determiner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeterminerClass {
    Article,
    Demonstrative,
    Possessive,
}

/// Fixed grouping of determiners used for substitution
#[derive(Debug, Clone)]
pub struct DeterminerTable {
    classes: Vec<(DeterminerClass, Vec<&'static str>)>,
}

impl Default for DeterminerTable {
    fn default() -> Self {
        Self {
            classes: vec![
                (DeterminerClass::Article, vec!["a", "an", "the"]),
                (DeterminerClass::Demonstrative, vec!["this", "that", "these", "those"]),
                (
                    DeterminerClass::Possessive,
                    vec!["my", "your", "his", "her", "its", "our", "their"],
                ),
            ],
        }
    }
}

impl DeterminerTable {
    /// Class of a determiner, matched case-insensitively
    pub fn class_of(&self, det: &str) -> Option<DeterminerClass> {
        let lower = det.to_lowercase();
        self.classes
            .iter()
            .find(|(_, members)| members.contains(&lower.as_str()))
            .map(|(class, _)| *class)
    }

    /// Members of a class in table order
    pub fn members(&self, class: DeterminerClass) -> &[&'static str] {
        self.classes
            .iter()
            .find(|(c, _)| *c == class)
            .map(|(_, members)| members.as_slice())
            .unwrap_or(&[])
    }

    /// Replace a determiner with a random other member of its class.
    ///
    /// Returns an empty string when the determiner belongs to no class or its class has
    /// no other member.
    pub fn det_sub<R: Rng + ?Sized>(&self, det: &str, rng: &mut R) -> String {
        let Some(class) = self.class_of(det) else {
            return String::new();
        };
        let lower = det.to_lowercase();
        let candidates: Vec<&str> = self
            .members(class)
            .iter()
            .copied()
            .filter(|member| *member != lower)
            .collect();

        candidates
            .choose(rng)
            .map(|member| member.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_class_of() {
        let table = DeterminerTable::default();
        assert_eq!(table.class_of("The"), Some(DeterminerClass::Article));
        assert_eq!(table.class_of("those"), Some(DeterminerClass::Demonstrative));
        assert_eq!(table.class_of("their"), Some(DeterminerClass::Possessive));
        assert_eq!(table.class_of("banana"), None);
    }

    #[test]
    fn test_det_sub_never_returns_input() {
        let table = DeterminerTable::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let sub = table.det_sub("the", &mut rng);
            assert!(sub == "a" || sub == "an", "unexpected substitute {:?}", sub);

            let sub = table.det_sub("The", &mut rng);
            assert!(sub == "a" || sub == "an", "unexpected substitute {:?}", sub);

            let sub = table.det_sub("my", &mut rng);
            assert!(table.members(DeterminerClass::Possessive).contains(&sub.as_str()));
            assert_ne!(sub, "my");
        }
    }

    #[test]
    fn test_det_sub_unknown_word() {
        let table = DeterminerTable::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(table.det_sub("banana", &mut rng), "");
    }

    #[test]
    fn test_det_sub_singleton_class() {
        let table = DeterminerTable {
            classes: vec![(DeterminerClass::Article, vec!["the"])],
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(table.det_sub("the", &mut rng), "");
    }
}
