//! Static class-index to crop-name table.

/// Number of crop classes every model variant scores.
pub const NUM_CLASSES: usize = 22;

/// Sentinel returned for any index outside the table.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Index-ordered crop names. The order is fixed by the trained models and
/// must never be reshuffled.
pub const LABELS: [&str; NUM_CLASSES] = [
    "apple",
    "banana",
    "blackgram",
    "chickpea",
    "coconut",
    "coffee",
    "cotton",
    "grapes",
    "jute",
    "kidneybeans",
    "lentil",
    "maize",
    "mango",
    "mothbeans",
    "mungbean",
    "muskmelon",
    "orange",
    "papaya",
    "pigeonpeas",
    "pomegranate",
    "rice",
    "watermelon",
];

/// Total lookup: out-of-domain indices resolve to [`UNKNOWN_LABEL`] rather
/// than panicking.
pub fn label_for(index: usize) -> &'static str {
    LABELS.get(index).copied().unwrap_or(UNKNOWN_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_index_in_domain_resolves() {
        for index in 0..NUM_CLASSES {
            assert_ne!(label_for(index), UNKNOWN_LABEL);
        }
        assert_eq!(label_for(0), "apple");
        assert_eq!(label_for(20), "rice");
        assert_eq!(label_for(21), "watermelon");
    }

    #[test]
    fn out_of_domain_resolves_to_sentinel() {
        assert_eq!(label_for(NUM_CLASSES), UNKNOWN_LABEL);
        assert_eq!(label_for(usize::MAX), UNKNOWN_LABEL);
    }

    #[test]
    fn labels_are_unique() {
        for (i, a) in LABELS.iter().enumerate() {
            for b in &LABELS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
