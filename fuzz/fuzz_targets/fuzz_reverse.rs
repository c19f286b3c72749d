#![no_main]
use std::io::{self, BufReader, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use linerev::{GrowthMode, LineReverser, ReverseError, ReverseOptions};

#[derive(Debug, Arbitrary)]
struct Input {
    /// Starting payload length of the buffer under test.
    line_max: u8,
    /// Seed for the read sizes handed out by the source.
    split_seed: u32,
    /// Capacity of the `BufReader` in front of the source.
    reader_capacity: u8,
    terminator: u8,
    data: Vec<u8>,
}

/// A source whose reads are cut at positions derived from a fixed seed.
struct Splitter<'a> {
    data: &'a [u8],
    seed: u64,
}

impl Read for Splitter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() || buf.is_empty() {
            return Ok(0);
        }
        // xorshift step so consecutive reads differ in size.
        self.seed ^= self.seed << 13;
        self.seed ^= self.seed >> 7;
        self.seed ^= self.seed << 17;
        let size = (self.seed as usize % self.data.len().min(buf.len())) + 1;
        buf[..size].copy_from_slice(&self.data[..size]);
        self.data = &self.data[size..];
        Ok(size)
    }
}

fn oracle(data: &[u8], terminator: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for line in data.split_inclusive(|&b| b == terminator) {
        match line.split_last() {
            Some((&last, payload)) if last == terminator => {
                out.extend(payload.iter().rev());
                out.push(last);
            }
            _ => out.extend(line.iter().rev()),
        }
    }
    out
}

fn run(input: &Input, growth: GrowthMode) -> (Result<(), ReverseError>, Vec<u8>) {
    let splitter = Splitter {
        data: &input.data,
        seed: u64::from(input.split_seed) | 1,
    };
    let mut source = BufReader::with_capacity(1 + usize::from(input.reader_capacity), splitter);
    let mut out = Vec::new();
    let mut reverser = LineReverser::new(ReverseOptions {
        line_max: 1 + usize::from(input.line_max % 64),
        growth,
        terminator: input.terminator,
    })
    .unwrap();
    let result = reverser.run(&mut source, &mut out).map(|_| ());
    (result, out)
}

fn check(input: &Input) {
    let expected = oracle(&input.data, input.terminator);

    let (result, grown) = run(input, GrowthMode::Growable);
    result.unwrap();
    assert_eq!(grown, expected, "growable output diverged");

    let (result, bounded) = run(input, GrowthMode::Bounded);
    match result {
        Ok(()) => assert_eq!(bounded, expected, "bounded output diverged"),
        Err(ReverseError::LineTooLong { .. }) => assert!(expected.starts_with(&bounded)),
        Err(e) => panic!("unexpected error: {e}"),
    }
}

fuzz_target!(|input: Input| check(&input));
