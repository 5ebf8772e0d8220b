#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use lua_scanner::{
    Cursor, Driver, Lexeme, SERIALIZATION_BUFFER_SIZE, Scanner, ScannerOptions, ValidTokens,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Fragments that steer the byte-level mutator toward literal edges.
static FRAGMENT_TABLE: &[&[u8]] = &[
    b"[[",
    b"]]",
    b"[=[",
    b"]=]",
    b"[==[",
    b"]==]",
    b"=",
    b"--",
    b"--[[",
    b"'",
    b"\"",
    b"\\",
    b"\\'",
    b"\n",
    b"\r\n",
    b"\t",
    "\u{00A0}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{3000}".as_bytes(),
];

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    let mut rng = SmallRng::seed_from_u64(u64::from(seed));
    if rng.random_ratio(1, 4) {
        return fuzzer_mutate(data, size, max_size);
    }

    let fragment = FRAGMENT_TABLE[rng.random_range(0..FRAGMENT_TABLE.len())];
    let limit = max_size.min(data.len());
    if size + fragment.len() > limit {
        return fuzzer_mutate(data, size, max_size);
    }

    // Splice the fragment in after the header bytes where possible.
    let at = rng.random_range(size.min(8)..=size);
    data.copy_within(at..size, at + fragment.len());
    data[at..at + fragment.len()].copy_from_slice(fragment);
    size + fragment.len()
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    flags: u8,
    state: [u8; 6],
    state_len: u8,
    src: &'a str,
}

impl Input<'_> {
    fn options(&self) -> ScannerOptions {
        ScannerOptions {
            allow_unicode_whitespace: self.flags & 1 != 0,
            long_comment_after_whitespace: self.flags & 2 != 0,
        }
    }

    fn valid(&self) -> ValidTokens {
        ValidTokens::from_bits_truncate(self.flags >> 2)
    }
}

fn check_driver(input: &Input<'_>) {
    let straight: Vec<_> = Driver::with_options(input.src, input.options()).collect();
    let suspended: Vec<_> = Driver::with_options(input.src, input.options())
        .suspend_between_tokens(true)
        .collect();
    assert_eq!(straight, suspended, "suspension changed the lexemes");

    let text: String = straight
        .iter()
        .map_while(|lexeme| lexeme.as_ref().ok().map(Lexeme::text))
        .collect();
    assert!(input.src.starts_with(&text), "lexemes do not tile the input");
    if straight.iter().all(Result::is_ok) {
        assert_eq!(text, input.src, "lexemes do not cover the input");
    }
}

/// Raw scanner calls from an arbitrary restored state and candidate set.
fn check_scanner(input: &Input<'_>) {
    let mut scanner = Scanner::new(input.options());
    let len = usize::from(input.state_len) % (input.state.len() + 1);
    if scanner.deserialize(&input.state[..len]).is_ok() {
        let mut buffer = [0u8; SERIALIZATION_BUFFER_SIZE];
        let written = scanner.serialize(&mut buffer);
        let mut again = Scanner::new(input.options());
        again.deserialize(&buffer[..written]).expect("own serialization");
        assert_eq!(again.state(), scanner.state());
    }

    let valid = input.valid();
    let mut cursor = Cursor::new(input.src);
    while !cursor.is_eof() {
        let before = cursor.position();
        match cursor.scan(&mut scanner, valid) {
            Some(token) => {
                assert!(valid.accepts(token.kind), "unoffered kind {:?}", token.kind);
                assert!(token.span.start >= before.byte);
                if token.span.is_empty() {
                    cursor.bump();
                }
            }
            None => {
                assert_eq!(cursor.position(), before);
                cursor.bump();
            }
        }
    }
}

fuzz_target!(|input: Input<'_>| {
    check_driver(&input);
    check_scanner(&input);
});
