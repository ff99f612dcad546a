// bitshrink-core/tests/transcode_tests.rs
//
// Encode adapter behaviour against fake ffprobe/ffmpeg adapters.

mod common;

use bitshrink_core::processing::bitrate::ResolutionTier;
use bitshrink_core::{FileTranscoder, MediaMetrics, TranscodeOutcome, VideoTranscoder};
use common::{FAKE_ENCODER_ERROR, FakeFfmpeg, FakeFfprobe, HD_METRICS, create_dummy_file, fixture};
use std::fs;

#[test]
fn test_success_encodes_to_mirrored_path() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture();
    let input = create_dummy_file(&fx.input_dir, "shows/s01/e01.mkv");
    let ffprobe = FakeFfprobe::new(HD_METRICS);
    let ffmpeg = FakeFfmpeg::new();

    let transcoder = VideoTranscoder::new(&fx.ctx, ffprobe.clone(), ffmpeg.clone());
    let outcome = transcoder.transcode(&input);

    let expected_output = fx.output_dir.join("shows/s01/e01.mkv");
    match &outcome {
        TranscodeOutcome::Success(summary) => {
            assert_eq!(summary.output_path, expected_output);
            assert_eq!(summary.source_bitrate, 10_000_000);
            assert_eq!(summary.target_bitrate, 4_000_000);
            assert_eq!(summary.tier, ResolutionTier::Hd1080);
            assert_eq!(summary.input_size, b"dummy content".len() as u64);
            assert_eq!(summary.output_size, b"encoded".len() as u64);
        }
        other => panic!("Expected Success, got {:?}", other),
    }

    let calls = ffmpeg.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].input_path, input);
    assert_eq!(calls[0].output_path, expected_output);
    assert_eq!(calls[0].video_codec, "hevc_nvenc");
    assert_eq!(calls[0].audio_codec, "aac");
    assert_eq!(calls[0].target_bitrate, 4_000_000);
    // One bit rate query and one dimension query.
    assert_eq!(ffprobe.calls(), 2);
    Ok(())
}

#[test]
fn test_existing_output_is_skipped_without_subprocess_calls() {
    let fx = fixture();
    let input = create_dummy_file(&fx.input_dir, "a.mp4");
    let existing = create_dummy_file(&fx.output_dir, "a.mp4");
    let ffprobe = FakeFfprobe::new(HD_METRICS);
    let ffmpeg = FakeFfmpeg::new();

    let transcoder = VideoTranscoder::new(&fx.ctx, ffprobe.clone(), ffmpeg.clone());
    let outcome = transcoder.transcode(&input);

    assert_eq!(
        outcome,
        TranscodeOutcome::Skipped {
            output_path: existing
        }
    );
    assert_eq!(ffprobe.calls(), 0);
    assert_eq!(ffmpeg.call_count(), 0);
}

#[test]
fn test_second_run_is_idempotent() {
    let fx = fixture();
    let input = create_dummy_file(&fx.input_dir, "nested/clip.ts");
    let ffprobe = FakeFfprobe::new(HD_METRICS);
    let ffmpeg = FakeFfmpeg::new();
    let transcoder = VideoTranscoder::new(&fx.ctx, ffprobe.clone(), ffmpeg.clone());

    assert!(transcoder.transcode(&input).is_success());
    assert!(transcoder.transcode(&input).is_skipped());

    assert_eq!(ffmpeg.call_count(), 1);
    assert_eq!(ffprobe.calls(), 2);
}

#[test]
fn test_probe_failure_is_failed_outcome_without_encode() {
    let fx = fixture();
    let input = create_dummy_file(&fx.input_dir, "audio_only.mkv");
    let ffprobe = FakeFfprobe::new(HD_METRICS).with_failure(&input);
    let ffmpeg = FakeFfmpeg::new();

    let transcoder = VideoTranscoder::new(&fx.ctx, ffprobe, ffmpeg.clone());
    let outcome = transcoder.transcode(&input);

    let message = outcome.failure().expect("probe failure should fail the file");
    assert!(message.contains("no video stream found"), "{}", message);
    assert_eq!(ffmpeg.call_count(), 0);
}

#[test]
fn test_encode_failure_keeps_partial_output() {
    let fx = fixture();
    let input = create_dummy_file(&fx.input_dir, "broken.avi");
    let ffprobe = FakeFfprobe::new(HD_METRICS);
    let ffmpeg = FakeFfmpeg::new().with_failure(&input);

    let transcoder = VideoTranscoder::new(&fx.ctx, ffprobe, ffmpeg);
    let outcome = transcoder.transcode(&input);

    let message = outcome.failure().expect("encode failure should fail the file");
    assert!(message.contains(FAKE_ENCODER_ERROR), "{}", message);

    let partial = fx.output_dir.join("broken.avi");
    assert_eq!(fs::read(&partial).unwrap(), b"part");
}

#[test]
fn test_bitrate_follows_source_tier() {
    let fx = fixture();
    let small = create_dummy_file(&fx.input_dir, "small.mp4");
    let portrait = create_dummy_file(&fx.input_dir, "portrait.mp4");
    let uhd = create_dummy_file(&fx.input_dir, "uhd.mp4");

    let ffprobe = FakeFfprobe::new(HD_METRICS)
        .with_metrics(&small, MediaMetrics { bitrate: 3_000_000, width: 1280, height: 720 })
        .with_metrics(&portrait, MediaMetrics { bitrate: 40_000_000, width: 1440, height: 2560 })
        .with_metrics(&uhd, MediaMetrics { bitrate: 100_000_000, width: 3840, height: 2160 });
    let ffmpeg = FakeFfmpeg::new();
    let transcoder = VideoTranscoder::new(&fx.ctx, ffprobe, ffmpeg.clone());

    for input in [&small, &portrait, &uhd] {
        assert!(transcoder.transcode(input).is_success());
    }

    let targets: Vec<u64> = ffmpeg.calls().iter().map(|c| c.target_bitrate).collect();
    assert_eq!(targets, vec![1_200_000, 10_000_000, 20_000_000]);
}

#[test]
fn test_file_outside_input_root_fails() {
    let fx = fixture();
    let stray = create_dummy_file(fx.output_dir.parent().unwrap(), "stray.mp4");
    let ffmpeg = FakeFfmpeg::new();
    let transcoder = VideoTranscoder::new(&fx.ctx, FakeFfprobe::new(HD_METRICS), ffmpeg.clone());

    let outcome = transcoder.transcode(&stray);

    assert!(outcome.is_failed());
    assert_eq!(ffmpeg.call_count(), 0);
}
