//! Cluster boundaries inside a composition.
//!
//! A cluster is what a single delete press removes. The grammar mirrors the
//! compose rules so that every cluster a translator builds is parsed back
//! as the same unit:
//!
//! ```text
//! cluster := consonant [virama special] [sign | virama]
//!          | any other single scalar
//! ```

use super::ScriptRules;

/// The last cluster of a composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Scalar offset of the cluster start
    pub start: usize,
    pub chars: Vec<char>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Consonant or conjunct with no sign and no trailing virama
    pub fn is_bare(&self, rules: &ScriptRules) -> bool {
        match self.chars.as_slice() {
            [c] => rules.is_consonant(*c),
            [c, v, s] => rules.is_consonant(*c) && rules.is_virama(*v) && rules.is_special_consonant(*s),
            _ => false,
        }
    }

    /// A single consonant followed by virama: the only shape a special
    /// consonant can join into a conjunct
    pub fn is_pure_consonant(&self, rules: &ScriptRules) -> bool {
        matches!(self.chars.as_slice(), [c, v] if rules.is_consonant(*c) && rules.is_virama(*v))
    }

    /// Whether the cluster ends in virama
    pub fn ends_in_virama(&self, rules: &ScriptRules) -> bool {
        self.chars.last().is_some_and(|c| rules.is_virama(*c))
    }

    /// Cluster that ends in a vowel sign over a bare base
    pub fn has_sign(&self, rules: &ScriptRules) -> bool {
        self.len() >= 2
            && self.chars.last().is_some_and(|c| rules.is_vowel_sign(*c))
            && rules.is_consonant(self.chars[0])
    }
}

/// Length of the cluster starting at `start`.
fn cluster_len(rules: &ScriptRules, chars: &[char], start: usize) -> usize {
    if !rules.is_consonant(chars[start]) {
        return 1;
    }
    let mut end = start + 1;
    if end + 1 < chars.len()
        && rules.is_virama(chars[end])
        && rules.is_special_consonant(chars[end + 1])
    {
        end += 2;
    }
    if end < chars.len() && (rules.is_vowel_sign(chars[end]) || rules.is_virama(chars[end])) {
        end += 1;
    }
    end - start
}

/// Split off the last cluster of `chars`, parsing left to right.
pub fn trailing_cluster(rules: &ScriptRules, chars: &[char]) -> Option<Cluster> {
    let mut start = 0;
    let mut last = None;
    while start < chars.len() {
        let len = cluster_len(rules, chars, start);
        last = Some(start..start + len);
        start += len;
    }
    last.map(|range| Cluster {
        start: range.start,
        chars: chars[range].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::tamil;
    use super::*;

    fn last(text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        trailing_cluster(&tamil(), &chars).map(|c| c.text()).unwrap_or_default()
    }

    #[test]
    fn test_empty() {
        assert!(trailing_cluster(&tamil(), &[]).is_none());
    }

    #[test]
    fn test_consonant_with_sign() {
        assert_eq!(last("அகா"), "கா");
    }

    #[test]
    fn test_pure_consonant_then_consonant() {
        // க் stays final, ம starts a new cluster
        assert_eq!(last("க்ம"), "ம");
        assert_eq!(last("மக்"), "க்");
    }

    #[test]
    fn test_conjunct() {
        assert_eq!(last("க்ஷ"), "க்ஷ");
        assert_eq!(last("க்ஷா"), "க்ஷா");
        assert_eq!(last("க்ஷ்"), "க்ஷ்");
    }

    #[test]
    fn test_conjunct_does_not_chain() {
        assert_eq!(last("க்ஷ்ஷ"), "ஷ");
    }

    #[test]
    fn test_orphan_sign() {
        assert_eq!(last("காி"), "ி");
        assert_eq!(last("ா"), "ா");
    }

    #[test]
    fn test_cluster_shapes() {
        let rules = tamil();
        let chars: Vec<char> = "க்".chars().collect();
        let cluster = trailing_cluster(&rules, &chars).unwrap();
        assert!(cluster.is_pure_consonant(&rules));
        assert!(!cluster.is_bare(&rules));
        assert!(cluster.ends_in_virama(&rules));

        let chars: Vec<char> = "க்ஷ".chars().collect();
        let cluster = trailing_cluster(&rules, &chars).unwrap();
        assert!(cluster.is_bare(&rules));
        assert_eq!(cluster.start, 0);

        let chars: Vec<char> = "அகா".chars().collect();
        let cluster = trailing_cluster(&rules, &chars).unwrap();
        assert!(cluster.has_sign(&rules));
        assert_eq!(cluster.start, 1);
    }
}
