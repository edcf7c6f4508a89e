use qrsym::{ECLevel, MaskPattern, QRBuilder, QRError, Symbol, Version};

const SCALE: usize = 3;
const QUIET_ZONE: usize = 4;

/// Rasterizes the symbol with a quiet zone and decodes it with an independent
/// reader.
fn decode(symbol: &Symbol) -> (rqrr::MetaData, String) {
    let w = symbol.module_count();
    let size = (w + 2 * QUIET_ZONE) * SCALE;
    let mut img = rqrr::PreparedImage::prepare_from_greyscale(size, size, |x, y| {
        let (mx, my) = (x / SCALE, y / SCALE);
        if mx < QUIET_ZONE || my < QUIET_ZONE || mx >= w + QUIET_ZONE || my >= w + QUIET_ZONE {
            255
        } else if symbol.is_dark(my - QUIET_ZONE, mx - QUIET_ZONE).unwrap() {
            0
        } else {
            255
        }
    });
    let grids = img.detect_grids();
    assert_eq!(grids.len(), 1, "Expected exactly one detected symbol");
    grids[0].decode().expect("Failed to decode symbol")
}

mod round_trip_tests {
    use test_case::test_case;

    use super::*;

    #[test_case("Hello, world!", 1, ECLevel::L; "v1 L")]
    #[test_case("TEST", 1, ECLevel::M; "v1 M")]
    #[test_case("12345", 1, ECLevel::Q; "v1 Q")]
    #[test_case("OK", 1, ECLevel::H; "v1 H")]
    #[test_case(&"a1".repeat(75), 7, ECLevel::L; "v7 L")]
    #[test_case(&"A11111111111111".repeat(8), 7, ECLevel::M; "v7 M")]
    #[test_case(&"aAAAAAA1111111111111AAAAAAa".repeat(3), 7, ECLevel::Q; "v7 Q")]
    #[test_case(&"1234567890".repeat(6), 7, ECLevel::H; "v7 H")]
    #[test_case(&"x9".repeat(130), 10, ECLevel::L; "v10 L")]
    #[test_case(&"A11111111111111".repeat(14), 10, ECLevel::M; "v10 M")]
    #[test_case(&"sixteen-bit count".repeat(80), 27, ECLevel::L; "v27 L")]
    #[test_case(&"1234567890".repeat(80), 27, ECLevel::Q; "v27 Q")]
    #[test_case(&"e".repeat(2900), 40, ECLevel::L; "v40 L")]
    #[test_case(&"1234567890".repeat(127), 40, ECLevel::H; "v40 H")]
    fn test_round_trip(text: &str, version: u8, ec_level: ECLevel) {
        let symbol = QRBuilder::new(text)
            .version(Version::new(version))
            .ec_level(ec_level)
            .build()
            .unwrap();
        let (meta, content) = decode(&symbol);
        assert_eq!(meta.version.0 as u8, version);
        assert_eq!(content, text);
    }

    #[test_case("short", 1; "fits v1")]
    #[test_case(&"0123456789".repeat(5), 4; "fits v4")]
    #[test_case(&"0123456789".repeat(24), 11; "fits v11")]
    fn test_auto_version_round_trip(text: &str, expected_version: u8) {
        let symbol = QRBuilder::new(text).ec_level(ECLevel::M).build().unwrap();
        assert_eq!(symbol.version(), Version::new(expected_version));
        let (meta, content) = decode(&symbol);
        assert_eq!(meta.version.0 as u8, expected_version);
        assert_eq!(content, text);
    }

    #[test]
    fn test_every_mask_decodes() {
        for pattern in 0..8 {
            let symbol = QRBuilder::new("mask coverage")
                .ec_level(ECLevel::Q)
                .mask(MaskPattern::new(pattern))
                .build()
                .unwrap();
            let (_, content) = decode(&symbol);
            assert_eq!(content, "mask coverage", "Mask {pattern} failed to round trip");
        }
    }
}

mod capacity_tests {
    use super::*;

    #[test]
    fn test_version_40_boundary() {
        // 2953 bytes is the byte mode limit at level L
        let text = "a".repeat(2953);
        let symbol = QRBuilder::new(&text).ec_level(ECLevel::L).build().unwrap();
        assert_eq!(symbol.version(), Version::new(40));

        let text = "a".repeat(2954);
        let err = QRBuilder::new(&text).ec_level(ECLevel::L).build().unwrap_err();
        assert_eq!(err, QRError::DataTooLong);
    }

    #[test]
    fn test_random_overflow() {
        use rand::distr::{Alphanumeric, SampleString};

        let text = Alphanumeric.sample_string(&mut rand::rng(), 4000);
        let err = QRBuilder::new(&text).ec_level(ECLevel::L).build().unwrap_err();
        assert_eq!(err, QRError::DataTooLong);
    }

    #[test]
    fn test_version_grows_with_ec_level() {
        let text = "capacity ordering ".repeat(10);
        let mut last = 0;
        for ec_level in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            let symbol = QRBuilder::new(&text).ec_level(ec_level).build().unwrap();
            let v = symbol.version().number();
            assert!(v >= last, "Version shrank from {last} to {v} at level {ec_level}");
            last = v;
        }
    }
}

mod structure_tests {
    use super::*;

    fn assert_finder_at(symbol: &Symbol, top: usize, left: usize) {
        for i in 0..7 {
            for j in 0..7 {
                let ring = i == 0 || i == 6 || j == 0 || j == 6;
                let core = (2..=4).contains(&i) && (2..=4).contains(&j);
                let expected = ring || core;
                assert_eq!(
                    symbol.is_dark(top + i, left + j).unwrap(),
                    expected,
                    "Finder mismatch at ({}, {})",
                    top + i,
                    left + j
                );
            }
        }
    }

    #[test]
    fn test_finder_patterns_all_versions() {
        for v in 1..=40 {
            let symbol = QRBuilder::new("finder check")
                .version(Version::new(v))
                .ec_level(ECLevel::L)
                .build()
                .unwrap();
            let w = symbol.module_count();
            assert_eq!(w, v as usize * 4 + 17);
            assert_finder_at(&symbol, 0, 0);
            assert_finder_at(&symbol, 0, w - 7);
            assert_finder_at(&symbol, w - 7, 0);
        }
    }

    #[test]
    fn test_dark_module() {
        for v in [1, 6, 7, 40] {
            let symbol = QRBuilder::new("dark module")
                .version(Version::new(v))
                .ec_level(ECLevel::M)
                .build()
                .unwrap();
            let w = symbol.module_count();
            assert!(symbol.is_dark(w - 8, 8).unwrap());
        }
    }

    #[test]
    fn test_dark_module_count_matches_grid() {
        let symbol = QRBuilder::new("balance").ec_level(ECLevel::M).build().unwrap();
        let w = symbol.module_count();
        let counted = (0..w)
            .flat_map(|r| (0..w).map(move |c| (r, c)))
            .filter(|&(r, c)| symbol.is_dark(r, c).unwrap())
            .count();
        assert_eq!(symbol.dark_module_count(), counted);
    }
}

mod format_info_tests {
    use super::*;

    const G15: u32 = 0b101_0011_0111;
    const G15_MASK: u32 = 0b101_0100_0001_0010;

    fn bit_len(x: u32) -> u32 {
        32 - x.leading_zeros()
    }

    fn bch_rem(mut x: u32) -> u32 {
        while bit_len(x) >= bit_len(G15) {
            x ^= G15 << (bit_len(x) - bit_len(G15));
        }
        x
    }

    // The 15 bits along row 8 and column 8 by the top-left finder, most
    // significant first
    fn read_format_bits(symbol: &Symbol) -> u32 {
        let coords = [
            (8, 0),
            (8, 1),
            (8, 2),
            (8, 3),
            (8, 4),
            (8, 5),
            (8, 7),
            (8, 8),
            (7, 8),
            (5, 8),
            (4, 8),
            (3, 8),
            (2, 8),
            (1, 8),
            (0, 8),
        ];
        coords
            .iter()
            .fold(0, |acc, &(r, c)| (acc << 1) | symbol.is_dark(r, c).unwrap() as u32)
    }

    #[test]
    fn test_format_info_self_check() {
        for (index, ec_level) in
            [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H].into_iter().enumerate()
        {
            for pattern in 0..8 {
                let symbol = QRBuilder::new("format")
                    .ec_level(ec_level)
                    .mask(MaskPattern::new(pattern))
                    .build()
                    .unwrap();
                let unmasked = read_format_bits(&symbol) ^ G15_MASK;
                assert_eq!(bch_rem(unmasked), 0, "BCH check failed for {ec_level} mask {pattern}");
                let payload = unmasked >> 10;
                assert_eq!(payload >> 3, index as u32 ^ 1);
                assert_eq!(payload & 0b111, pattern as u32);
            }
        }
    }
}

mod qr_proptests {
    use proptest::prelude::*;

    use super::*;

    fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    fn qr_strategy() -> impl Strategy<Value = (ECLevel, String)> {
        ec_level_strategy().prop_flat_map(|ec_level| {
            let max_size = match ec_level {
                ECLevel::L => 2950,
                ECLevel::M => 2330,
                ECLevel::Q => 1660,
                ECLevel::H => 1270,
            };
            let pattern = format!("[ -~]{{1,{max_size}}}");
            proptest::string::string_regex(&pattern)
                .unwrap()
                .prop_map(move |text| (ec_level, text))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        #[ignore]
        fn proptest_ascii_round_trip(params in qr_strategy()) {
            let (ec_level, text) = params;
            let symbol = QRBuilder::new(&text).ec_level(ec_level).build().unwrap();
            let (_, content) = decode(&symbol);
            prop_assert_eq!(content, text);
        }
    }
}
