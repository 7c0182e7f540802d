/// Turn an operator selection such as "1,3-5" or "all" into 0-based indices
/// into a list of `count` entries.
///
/// Ordinals are 1-based. Out-of-range ordinals and malformed tokens are
/// dropped without failing the rest of the input. Ranges are inclusive and
/// clipped to the list. Token order is preserved and duplicates are kept.
#[must_use]
pub fn parse_selection(input: &str, count: usize) -> Vec<usize> {
    let input = input.trim().to_lowercase();
    let tokens: Vec<&str> = input.split(',').map(str::trim).collect();

    if tokens.contains(&"all") {
        return (0..count).collect();
    }

    let mut indices = Vec::new();
    for token in tokens {
        if let Some((start, end)) = token.split_once('-') {
            let (Ok(start), Ok(end)) = (start.trim().parse::<usize>(), end.trim().parse::<usize>())
            else {
                continue;
            };
            // Ordinals outside 1..=count fall away individually
            let first = start.max(1);
            let last = end.min(count);
            if first <= last {
                indices.extend((first..=last).map(|ordinal| ordinal - 1));
            }
        } else if let Ok(ordinal) = token.parse::<usize>()
            && (1..=count).contains(&ordinal)
        {
            indices.push(ordinal - 1);
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_ordinals_and_ranges() {
        assert_eq!(parse_selection("1,3-5", 6), vec![0, 2, 3, 4]);
    }

    #[test]
    fn test_all() {
        assert_eq!(parse_selection("all", 6), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(parse_selection("  ALL \n", 3), vec![0, 1, 2]);
        assert_eq!(parse_selection("2,all", 3), vec![0, 1, 2]);
        assert!(parse_selection("all", 0).is_empty());
    }

    #[test]
    fn test_out_of_range_ordinals() {
        assert!(parse_selection("0", 6).is_empty());
        assert!(parse_selection("7", 6).is_empty());
        assert_eq!(parse_selection("7,2", 6), vec![1]);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        assert!(parse_selection("2-1", 6).is_empty());
    }

    #[test]
    fn test_range_is_clipped() {
        assert_eq!(parse_selection("5-9", 6), vec![4, 5]);
        assert_eq!(parse_selection("0-2", 6), vec![0, 1]);
        assert!(parse_selection("8-9", 6).is_empty());
    }

    #[test]
    fn test_malformed_tokens_are_dropped() {
        assert_eq!(parse_selection("x,2,1-y,-3,4-,1-2-3,3", 6), vec![1, 2]);
        assert!(parse_selection("", 6).is_empty());
        assert!(parse_selection(",,", 6).is_empty());
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        assert_eq!(parse_selection("1,1-2", 6), vec![0, 0, 1]);
        assert_eq!(parse_selection("4,2", 6), vec![3, 1]);
    }

    #[test]
    fn test_whitespace_around_tokens() {
        assert_eq!(parse_selection(" 1 , 2 - 3 ", 6), vec![0, 1, 2]);
    }
}
