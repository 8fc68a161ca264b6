use shiok_kernel::SAFE_ALPHABET;
use shiok_kernel::safe_nanoid;

#[test]
fn generates_expected_length_and_charset() {
    let id = safe_nanoid!();
    assert_eq!(id.len(), 12);

    for ch in id.chars() {
        assert!(SAFE_ALPHABET.contains(&ch), "unexpected character in nanoid: {ch}");
    }
}

#[test]
fn seeds_differ_between_calls() {
    let first = safe_nanoid!(8);
    let second = safe_nanoid!(8);
    assert_eq!(first.len(), 8);
    assert_ne!(first, second);
}
