use quickcheck::QuickCheck;

use super::iterations;
use crate::{ReverseOptions, reverse_bytes};

fn small() -> ReverseOptions {
    ReverseOptions {
        line_max: 3,
        ..Default::default()
    }
}

/// Property: reversing a stream twice gives the stream back.
#[test]
fn double_reverse_roundtrip() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(input: Vec<u8>) -> bool {
        let once = reverse_bytes(&input, small()).unwrap();
        let twice = reverse_bytes(&once, small()).unwrap();
        twice == input
    }

    QuickCheck::new()
        .tests(iterations())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}

/// Property: every line keeps its length and its terminator, and a missing
/// final terminator stays missing.
#[test]
fn terminators_stay_in_place() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(lines: Vec<Vec<u8>>, trailing: bool) -> bool {
        let lines: Vec<Vec<u8>> = lines
            .into_iter()
            .map(|line| line.into_iter().filter(|&b| b != b'\n').collect())
            .collect();
        let mut input = lines.join(&b'\n');
        if trailing && !lines.is_empty() {
            input.push(b'\n');
        }

        let out = reverse_bytes(&input, small()).unwrap();
        let positions = |bytes: &[u8]| -> Vec<usize> {
            bytes
                .iter()
                .enumerate()
                .filter_map(|(i, &b)| (b == b'\n').then_some(i))
                .collect()
        };

        out.len() == input.len() && positions(&out) == positions(&input)
    }

    QuickCheck::new()
        .tests(iterations())
        .quickcheck(prop as fn(Vec<Vec<u8>>, bool) -> bool);
}
