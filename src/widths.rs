//! First pass over a directory batch: column widths and block totals.

use crate::entry::DirEntry;
use crate::identity::IdentityResolver;

/// Widths of the right-aligned long-listing columns, plus the `total` figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    pub owner_width: usize,
    pub group_width: usize,
    pub size_width: usize,
    /// Sum of `blocks512 / 2` over the batch (1 KiB units).
    pub total_blocks: u64,
}

/// Number of decimal digits in `n`; zero has one digit.
pub fn decimal_digit_count(mut n: u64) -> usize {
    let mut digits = 1;
    while n > 9 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Measure a visible batch. An empty batch yields all-zero widths.
pub fn compute_widths(entries: &[DirEntry], identity: &dyn IdentityResolver) -> ColumnWidths {
    if entries.is_empty() {
        return ColumnWidths::default();
    }

    let mut widths = ColumnWidths::default();
    let mut max_size = 0u64;
    for entry in entries {
        let owner = identity.owner(entry.meta.owner_id);
        let group = identity.group(entry.meta.group_id);
        widths.owner_width = widths.owner_width.max(owner.chars().count());
        widths.group_width = widths.group_width.max(group.chars().count());
        max_size = max_size.max(entry.meta.size_bytes);
        widths.total_blocks += entry.meta.blocks512 / 2;
    }
    widths.size_width = decimal_digit_count(max_size);
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryKind, StatInfo};
    use std::path::PathBuf;
    use std::time::SystemTime;

    struct Names;

    impl IdentityResolver for Names {
        fn owner(&self, uid: u32) -> String {
            match uid {
                1 => "alice".to_string(),
                2 => "bob".to_string(),
                other => other.to_string(),
            }
        }

        fn group(&self, gid: u32) -> String {
            match gid {
                1 => "staff".to_string(),
                other => other.to_string(),
            }
        }
    }

    fn file(name: &str, size: u64, blocks: u64, uid: u32, gid: u32) -> DirEntry {
        DirEntry::new(
            name,
            PathBuf::from(name),
            EntryKind::Regular,
            StatInfo {
                size_bytes: size,
                blocks512: blocks,
                link_count: 1,
                owner_id: uid,
                group_id: gid,
                mtime: SystemTime::UNIX_EPOCH,
                mode: 0o644,
            },
        )
    }

    #[test]
    fn digit_count_edges() {
        assert_eq!(decimal_digit_count(0), 1);
        assert_eq!(decimal_digit_count(9), 1);
        assert_eq!(decimal_digit_count(10), 2);
        assert_eq!(decimal_digit_count(12345), 5);
        assert_eq!(decimal_digit_count(u64::MAX), 20);
    }

    #[test]
    fn widths_follow_longest_values() {
        let entries = vec![file("a", 5, 8, 1, 1), file("b", 12345, 32, 2, 42)];
        let widths = compute_widths(&entries, &Names);
        assert_eq!(widths.size_width, 5);
        assert_eq!(widths.owner_width, 5);
        assert_eq!(widths.group_width, 5);
        assert_eq!(widths.total_blocks, 4 + 16);
    }

    #[test]
    fn odd_block_counts_round_down() {
        let entries = vec![file("a", 1, 1, 1, 1), file("b", 1, 3, 1, 1)];
        assert_eq!(compute_widths(&entries, &Names).total_blocks, 1);
    }

    #[test]
    fn zero_sized_files_still_take_one_digit() {
        let entries = vec![file("empty", 0, 0, 1, 1)];
        assert_eq!(compute_widths(&entries, &Names).size_width, 1);
    }

    #[test]
    fn empty_batch_is_all_zero() {
        assert_eq!(compute_widths(&[], &Names), ColumnWidths::default());
    }
}
