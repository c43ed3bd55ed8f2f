#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::{rngs::StdRng, Rng, SeedableRng};
    use zstd_handle::{
        context::{CompressionContext, DecompressionContext},
        dict::{self, CompressionDictionary, DecompressionDictionary},
        engine::codes,
        frame,
        params::CompressionParameterSet,
        types::{EndMode, ResetMode, ZstdError},
    };

    const WORDS: [&str; 12] = [
        "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india",
        "juliet", "kilo", "lima",
    ];

    fn record(rng: &mut StdRng, i: usize) -> Vec<u8> {
        format!(
            "{{\"id\":{},\"user\":\"{}-{}\",\"tags\":[\"{}\",\"{}\"],\"score\":{},\"active\":{}}}",
            i,
            WORDS[rng.gen_range(0..WORDS.len())],
            rng.gen_range(0..10_000),
            WORDS[rng.gen_range(0..WORDS.len())],
            WORDS[rng.gen_range(0..WORDS.len())],
            rng.gen_range(0..1_000),
            rng.gen_bool(0.5)
        )
        .into_bytes()
    }

    fn trained(seed: u64) -> Vec<u8> {
        let mut rng = StdRng::seed_from_u64(seed);
        let samples: Vec<Vec<u8>> = (0..1_000).map(|i| record(&mut rng, i)).collect();
        dict::train(&samples, 4096).unwrap()
    }

    struct Fixture {
        cdict: CompressionDictionary,
        ddict: Arc<DecompressionDictionary>,
        payload: Vec<u8>,
        frame: Vec<u8>,
    }

    fn fixture(seed: u64) -> Fixture {
        let bytes = trained(seed);
        let params = CompressionParameterSet::new().unwrap();
        let cdict = CompressionDictionary::new(&bytes, &params).unwrap();
        let ddict = Arc::new(DecompressionDictionary::new(&bytes).unwrap());
        let mut rng = StdRng::seed_from_u64(seed ^ 0xFF);
        let payload = record(&mut rng, 42);
        let mut cctx = CompressionContext::new().unwrap();
        let frame = cctx.compress_using_dictionary(&payload, &cdict).unwrap();
        Fixture { cdict, ddict, payload, frame }
    }

    fn text(len: usize) -> Vec<u8> {
        b"lorem ipsum dolor sit amet, consectetur adipiscing elit. "
            .iter()
            .copied()
            .cycle()
            .take(len)
            .collect()
    }

    // --- Streaming ---

    #[test]
    fn test_empty_input_rejected() {
        let mut dctx = DecompressionContext::new().unwrap();
        let err = dctx.decompress_stream(&[]).unwrap_err();
        assert_eq!(err, ZstdError::EmptyInput);
        assert!(err.is_usage());
        assert_eq!(dctx.counters().calls, 0);
    }

    #[test]
    fn test_whole_frame_reports_end() {
        let data = text(100_000);
        let compressed = frame::compress(&data, 3).unwrap();
        let mut dctx = DecompressionContext::new().unwrap();
        let (out, is_end) = dctx.decompress_stream(&compressed).unwrap();
        assert_eq!(out, data);
        assert!(is_end);
        assert!(dctx.counters().buffer_grows > 0);
    }

    #[test]
    fn test_split_frame_reports_end_on_last_piece() {
        let data = text(30_000);
        let compressed = frame::compress(&data, 1).unwrap();
        let (a, b) = compressed.split_at(compressed.len() / 2);
        let mut dctx = DecompressionContext::new().unwrap();
        let (mut out, end_a) = dctx.decompress_stream(a).unwrap();
        let (tail, end_b) = dctx.decompress_stream(b).unwrap();
        out.extend(tail);
        assert!(!end_a);
        assert!(end_b);
        assert_eq!(out, data);
    }

    #[test]
    fn test_byte_at_a_time() {
        let data = text(2_000);
        let compressed = frame::compress(&data, 5).unwrap();
        let mut dctx = DecompressionContext::new().unwrap();
        let mut out = Vec::new();
        let mut ends = 0;
        for b in compressed.chunks(1) {
            let (chunk, is_end) = dctx.decompress_stream(b).unwrap();
            out.extend(chunk);
            ends += is_end as usize;
        }
        assert_eq!(out, data);
        assert_eq!(ends, 1);
    }

    #[test]
    fn test_call_stops_at_end_of_frame() {
        let first = frame::compress(b"first frame|", 3).unwrap();
        let second = frame::compress(b"second frame", 3).unwrap();
        let mut joined = first.clone();
        joined.extend(&second);

        let mut dctx = DecompressionContext::new().unwrap();
        let (out, is_end) = dctx.decompress_stream(&joined).unwrap();
        assert_eq!(out, b"first frame|");
        assert!(is_end);
        assert_eq!(dctx.counters().bytes_in, first.len() as u64);

        // The session is ready for the next frame
        let (out, is_end) = dctx.decompress_stream(&second).unwrap();
        assert_eq!(out, b"second frame");
        assert!(is_end);
        assert_eq!(dctx.counters().frames_ended, 2);
    }

    #[test]
    fn test_trailing_bytes_after_frame_are_ignored() {
        let mut input = frame::compress(b"hello frame", 3).unwrap();
        input.extend_from_slice(b"\0\0\0\0trailing");
        let mut dctx = DecompressionContext::new().unwrap();
        let (out, is_end) = dctx.decompress_stream(&input).unwrap();
        assert_eq!(out, b"hello frame");
        assert!(is_end);
    }

    #[test]
    fn test_garbage_is_corrupt_data() {
        let mut dctx = DecompressionContext::new().unwrap();
        let err = dctx.decompress_stream(b"definitely not a zstd frame").unwrap_err();
        assert!(matches!(err, ZstdError::CorruptData(e) if e.code == codes::PREFIX_UNKNOWN));
        assert!(!err.is_usage());
    }

    #[test]
    fn test_window_limit_rejects_large_window() {
        let data = text(1 << 20);
        let compressed = frame::compress(&data, 3).unwrap();
        let mut dctx = DecompressionContext::new().unwrap();
        dctx.set_parameter("windowLogMax", 10).unwrap();
        assert_eq!(dctx.get_parameter("windowLogMax").unwrap(), 10);
        let err = dctx.decompress_stream(&compressed).unwrap_err();
        assert!(
            matches!(err, ZstdError::CorruptData(e) if e.code == codes::FRAME_PARAMETER_WINDOW_TOO_LARGE)
        );
    }

    // --- Parameters ---

    #[test]
    fn test_unknown_parameter_fails_for_get_and_set() {
        let mut dctx = DecompressionContext::new().unwrap();
        assert!(matches!(dctx.get_parameter("compressionLevel"), Err(ZstdError::UnknownParameter { .. })));
        assert!(matches!(dctx.set_parameter("bogus", 0), Err(ZstdError::UnknownParameter { .. })));
    }

    #[test]
    fn test_invalid_window_log_max() {
        let mut dctx = DecompressionContext::new().unwrap();
        let err = dctx.set_parameter("windowLogMax", 99).unwrap_err();
        assert!(matches!(err, ZstdError::InvalidParameterValue { name: "windowLogMax", value: 99, .. }));
    }

    // --- Dictionary pinning ---

    #[test]
    fn test_pin_outlives_caller_reference() {
        let f = fixture(1);
        let id = f.ddict.id();
        assert_ne!(id, 0);

        let mut dctx = DecompressionContext::new().unwrap();
        dctx.ref_dictionary(Arc::clone(&f.ddict)).unwrap();
        assert_eq!(Arc::strong_count(&f.ddict), 2);
        drop(f.ddict);

        assert_eq!(dctx.pinned_dictionary_id().unwrap(), Some(id));
        let (out, is_end) = dctx.decompress_stream(&f.frame).unwrap();
        assert_eq!(out, f.payload);
        assert!(is_end);
    }

    #[test]
    fn test_session_reset_keeps_pin() {
        let f = fixture(2);
        let mut dctx = DecompressionContext::new().unwrap();
        dctx.ref_dictionary(Arc::clone(&f.ddict)).unwrap();
        dctx.reset(ResetMode::Session).unwrap();
        assert_eq!(Arc::strong_count(&f.ddict), 2);
        let (out, _) = dctx.decompress_stream(&f.frame).unwrap();
        assert_eq!(out, f.payload);
    }

    #[test]
    fn test_full_reset_clears_pin() {
        let f = fixture(3);
        let mut dctx = DecompressionContext::new().unwrap();
        dctx.ref_dictionary(Arc::clone(&f.ddict)).unwrap();
        dctx.reset(ResetMode::All).unwrap();
        assert_eq!(Arc::strong_count(&f.ddict), 1);
        assert_eq!(dctx.pinned_dictionary_id().unwrap(), None);

        let err = dctx.decompress_stream(&f.frame).unwrap_err();
        assert!(matches!(err, ZstdError::CorruptData(e) if e.code == codes::DICTIONARY_WRONG));
    }

    #[test]
    fn test_params_reset_clears_pin() {
        let f = fixture(4);
        let mut dctx = DecompressionContext::new().unwrap();
        dctx.ref_dictionary(Arc::clone(&f.ddict)).unwrap();
        dctx.reset(ResetMode::Params).unwrap();
        assert_eq!(Arc::strong_count(&f.ddict), 1);
    }

    #[test]
    fn test_new_reference_replaces_pin() {
        let a = fixture(5);
        let b = fixture(6);
        let mut dctx = DecompressionContext::new().unwrap();
        dctx.ref_dictionary(Arc::clone(&a.ddict)).unwrap();
        dctx.ref_dictionary(Arc::clone(&b.ddict)).unwrap();
        assert_eq!(Arc::strong_count(&a.ddict), 1);
        assert_eq!(Arc::strong_count(&b.ddict), 2);
        assert_eq!(dctx.pinned_dictionary_id().unwrap(), Some(b.ddict.id()));
        assert_eq!(dctx.registered_dictionary_count().unwrap(), 0);

        let (out, _) = dctx.decompress_stream(&b.frame).unwrap();
        assert_eq!(out, b.payload);
    }

    #[test]
    fn test_repeated_reference_registers_once() {
        let f = fixture(9);
        let mut dctx = DecompressionContext::new().unwrap();
        dctx.set_parameter("refMultipleDDicts", 1).unwrap();
        for _ in 0..1_000 {
            dctx.ref_dictionary(Arc::clone(&f.ddict)).unwrap();
        }
        assert_eq!(dctx.registered_dictionary_count().unwrap(), 1);
        // registered + active
        assert_eq!(Arc::strong_count(&f.ddict), 3);

        // A different object with the same id takes over the slot
        let twin = Arc::new(DecompressionDictionary::new(&trained(9)).unwrap());
        assert_eq!(twin.id(), f.ddict.id());
        dctx.ref_dictionary(Arc::clone(&twin)).unwrap();
        assert_eq!(dctx.registered_dictionary_count().unwrap(), 1);
        assert_eq!(Arc::strong_count(&f.ddict), 1);
        assert_eq!(Arc::strong_count(&twin), 3);

        let (out, _) = dctx.decompress_stream(&f.frame).unwrap();
        assert_eq!(out, f.payload);
    }

    #[test]
    fn test_multiple_references_are_all_pinned() {
        let a = fixture(7);
        let b = fixture(8);
        let mut dctx = DecompressionContext::new().unwrap();
        dctx.set_parameter("refMultipleDDicts", 1).unwrap();
        dctx.ref_dictionary(Arc::clone(&a.ddict)).unwrap();
        dctx.ref_dictionary(Arc::clone(&b.ddict)).unwrap();
        // a: registered; b: registered + active
        assert_eq!(Arc::strong_count(&a.ddict), 2);
        assert_eq!(Arc::strong_count(&b.ddict), 3);
        assert_eq!(dctx.registered_dictionary_count().unwrap(), 2);

        let (out_a, _) = dctx.decompress_stream(&a.frame).unwrap();
        let (out_b, _) = dctx.decompress_stream(&b.frame).unwrap();
        assert_eq!(out_a, a.payload);
        assert_eq!(out_b, b.payload);

        // The engine's lookup set outlives parameter resets
        dctx.reset(ResetMode::All).unwrap();
        assert_eq!(Arc::strong_count(&a.ddict), 2);
        assert_eq!(Arc::strong_count(&b.ddict), 2);
        assert_eq!(dctx.pinned_dictionary_id().unwrap(), None);

        dctx.close();
        assert_eq!(Arc::strong_count(&a.ddict), 1);
        assert_eq!(Arc::strong_count(&b.ddict), 1);
    }

    #[test]
    fn test_close_releases_pin_after_engine() {
        let f = fixture(9);
        let mut dctx = DecompressionContext::new().unwrap();
        dctx.ref_dictionary(Arc::clone(&f.ddict)).unwrap();
        assert!(dctx.close());
        assert_eq!(Arc::strong_count(&f.ddict), 1);
        assert!(!dctx.close());
    }

    #[test]
    fn test_drop_releases_pin() {
        let f = fixture(10);
        {
            let mut dctx = DecompressionContext::new().unwrap();
            dctx.ref_dictionary(Arc::clone(&f.ddict)).unwrap();
        }
        assert_eq!(Arc::strong_count(&f.ddict), 1);
    }

    // --- Raw blocks ---

    #[test]
    fn test_block_round_trip() {
        let data = text(50_000);
        let mut cctx = CompressionContext::new().unwrap();
        let block = cctx.compress_block(&data, None).unwrap();
        assert!(!block.is_empty());
        assert!(block.len() < data.len());

        let mut dctx = DecompressionContext::new().unwrap();
        assert_eq!(dctx.decompress_block(&block, None).unwrap(), data);
    }

    #[test]
    fn test_block_round_trip_with_dictionary() {
        let f = fixture(11);
        let mut cctx = CompressionContext::new().unwrap();
        let block = cctx.compress_block(&f.payload, Some(&f.cdict)).unwrap();
        assert!(!block.is_empty());

        let mut dctx = DecompressionContext::new().unwrap();
        assert_eq!(dctx.decompress_block(&block, Some(&f.ddict)).unwrap(), f.payload);
    }

    #[test]
    fn test_block_does_not_disturb_streaming() {
        let data = text(10_000);
        let compressed = frame::compress(&data, 3).unwrap();
        let mut cctx = CompressionContext::new().unwrap();
        let block = cctx.compress_block(&data, None).unwrap();
        let mut dctx = DecompressionContext::new().unwrap();
        dctx.decompress_block(&block, None).unwrap();

        let (out, is_end) = dctx.decompress_stream(&compressed).unwrap();
        assert_eq!(out, data);
        assert!(is_end);

        let streamed = cctx.compress_stream(&data, EndMode::End).unwrap();
        assert_eq!(frame::decompress(&streamed).unwrap(), data);
    }

    #[test]
    fn test_oversized_block_rejected() {
        let data = text(200_000);
        let mut cctx = CompressionContext::new().unwrap();
        assert!(matches!(
            cctx.compress_block(&data, None),
            Err(ZstdError::OutOfRange { what: "block size", .. })
        ));
    }
}
