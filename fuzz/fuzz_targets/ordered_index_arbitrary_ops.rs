#![no_main]

use libfuzzer_sys::fuzz_target;
use recency_index::OrderedIndex;

// Fuzz arbitrary operation sequences on OrderedIndex
//
// Byte pairs (op, key) drive push_head, push_tail, remove, mark_accessed,
// evict_head, evict_tail, cursor walks and clear. The full chain is
// validated after every step.
fuzz_target!(|data: &[u8]| {
    let mut index: OrderedIndex<u8> = OrderedIndex::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 8;
        let key = pair[1];
        let old_len = index.len();

        match op {
            0 => {
                let was_new = !index.contains(&key);
                assert_eq!(index.push_head(key), was_new);
                assert_eq!(index.peek_head(), Some(&key));
            }
            1 => {
                let present = index.contains(&key);
                let result = index.push_tail(key);
                assert_eq!(result.is_err(), present);
                if !present {
                    assert_eq!(index.peek_tail(), Some(&key));
                }
            }
            2 => {
                let present = index.contains(&key);
                assert_eq!(index.remove(&key), present);
                assert!(!index.contains(&key));
                if present {
                    assert_eq!(index.len(), old_len - 1);
                }
            }
            3 => {
                if index.mark_accessed(&key) {
                    assert_eq!(index.peek_head(), Some(&key));
                } else {
                    assert!(!index.contains(&key));
                }
                assert_eq!(index.len(), old_len);
            }
            4 => {
                let expected = index.peek_head().copied();
                assert_eq!(index.evict_head(), expected);
            }
            5 => {
                let expected = index.peek_tail().copied();
                assert_eq!(index.evict_tail(), expected);
            }
            6 => {
                let mut cursor = index.cursor();
                let mut walked = Vec::new();
                while let Some(item) = cursor.advance(&index).unwrap() {
                    walked.push(*item);
                }
                assert_eq!(walked, index.snapshot());
            }
            7 => {
                index.clear();
                assert!(index.is_empty());
                assert_eq!(index.peek_head(), None);
                assert_eq!(index.peek_tail(), None);
            }
            _ => unreachable!(),
        }

        index.check_invariants().unwrap();
    }
});
