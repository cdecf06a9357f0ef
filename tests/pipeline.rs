use bitswizzle::{
    analyze, Axis, BitPermutation, BitResult, Config, ConfigBuilder, Error, MatchMode, PixelBuffer,
};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256StarStar;
use rstest::rstest;

/// Image where every pixel is distinct.
fn unique_image(width: u32, height: u32, random: &mut impl Rng) -> PixelBuffer {
    let mut v: Vec<u32> = (0..width * height).map(|i| i.wrapping_mul(0x9E37_79B9)).collect();
    v.shuffle(random);
    PixelBuffer::from_vec(width, height, v).unwrap()
}

fn buf(width: u32, height: u32, v: Vec<u32>) -> PixelBuffer {
    PixelBuffer::from_vec(width, height, v).unwrap()
}

#[rstest]
#[case(1, 1)]
#[case(2, 1)]
#[case(4, 4)]
#[case(32, 8)]
#[case(16, 64)]
fn recovers_random_permutation(#[case] width: u32, #[case] height: u32) {
    let mut random = Xoshiro256StarStar::seed_from_u64(u64::from(width * 1000 + height));
    let a = unique_image(width, height, &mut random);

    for _ in 0..8 {
        let perm = BitPermutation::random(a.len().trailing_zeros(), &mut random);
        let b = perm.apply(&a).unwrap();

        let ret = analyze(&a, &b, &Config::default()).unwrap();
        assert_eq!(ret.unique_pixels, a.len());
        assert!(ret.is_complete());
        assert_eq!(ret.permutation(), Some(perm));
    }
}

#[test]
fn swapped_bits_on_2x2() {
    let a = buf(2, 2, vec![1, 2, 3, 4]);
    let b = buf(2, 2, vec![1, 3, 2, 4]);
    let ret = analyze(&a, &b, &Config::default()).unwrap();
    assert_eq!(
        ret.bits,
        [
            BitResult::Mapped { source: 0, dest: 1 },
            BitResult::Mapped { source: 1, dest: 0 },
        ]
    );
}

#[test]
fn rotation_is_not_a_bit_permutation() {
    // index 0->1, 1->3, 2->0, 3->2
    let a = buf(2, 2, vec![1, 2, 3, 4]);
    let b = buf(2, 2, vec![3, 1, 4, 2]);
    let ret = analyze(&a, &b, &Config::default()).unwrap();
    assert_eq!(
        ret.bits,
        [
            BitResult::Mapped { source: 0, dest: 1 },
            BitResult::NoMatch { source: 1 },
        ]
    );
    assert!(!ret.is_complete());
    assert_eq!(ret.permutation(), None);
}

#[test]
fn is_deterministic() {
    let mut random = Xoshiro256StarStar::seed_from_u64(42);
    let a = unique_image(64, 32, &mut random);
    let b = BitPermutation::random(11, &mut random).apply(&a).unwrap();

    let first = analyze(&a, &b, &Config::default()).unwrap();
    for _ in 0..4 {
        assert_eq!(analyze(&a, &b, &Config::default()).unwrap(), first);
    }
}

#[test]
fn duplicates_do_not_prevent_recovery() {
    let mut random = Xoshiro256StarStar::seed_from_u64(3);
    let mut v: Vec<u32> = (0..256).collect();
    // a few repeated pixels, everything else stays unique
    v[10] = 0;
    v[200] = 0;
    v[77] = 5;
    v.shuffle(&mut random);
    let a = buf(16, 16, v);

    let perm = BitPermutation::random(8, &mut random);
    let b = perm.apply(&a).unwrap();

    let ret = analyze(&a, &b, &Config::default()).unwrap();
    assert_eq!(ret.unique_pixels, 256 - 5);
    assert_eq!(ret.permutation(), Some(perm));

    let strict = ConfigBuilder::new().mode(MatchMode::Strict).build();
    assert!(matches!(
        analyze(&a, &b, &strict),
        Err(Error::DuplicatePixel { .. })
    ));
}

#[test]
fn not_power_of_two_before_matching() {
    // would also fail content check, dimension check runs first
    let a = buf(100, 1, vec![0; 100]);
    let b = buf(100, 1, vec![1; 100]);
    assert_eq!(
        analyze(&a, &b, &Config::default()),
        Err(Error::NotPowerOfTwo {
            axis: Axis::Width,
            value: 100
        })
    );
}

#[test]
fn size_mismatch() {
    let a = buf(4, 4, (0..16).collect());
    let b = buf(4, 8, (0..32).collect());
    assert_eq!(
        analyze(&a, &b, &Config::default()),
        Err(Error::SizeMismatch {
            a: (4, 4),
            b: (4, 8)
        })
    );
}

#[test]
fn content_mismatch() {
    let a = buf(2, 2, vec![1, 2, 3, 4]);
    let b = buf(2, 2, vec![1, 2, 3, 5]);
    assert_eq!(
        analyze(&a, &b, &Config::default()),
        Err(Error::ContentMismatch { sum_a: 10, sum_b: 11 })
    );
}

#[test]
fn unmatched_pixel_with_equal_sum() {
    let a = buf(2, 2, vec![1, 4, 3, 2]);
    let b = buf(2, 2, vec![2, 3, 3, 2]);
    assert_eq!(
        analyze(&a, &b, &Config::default()),
        Err(Error::UnmatchedPixel { index: 0 })
    );
}

#[test]
fn solid_color_has_no_usable_pixels() {
    let a = buf(4, 4, vec![0xFF12_3456; 16]);
    assert_eq!(
        analyze(&a, &a, &Config::default()),
        Err(Error::NoUsablePixels)
    );
}
