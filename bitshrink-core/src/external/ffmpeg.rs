// bitshrink-core/src/external/ffmpeg.rs
//
// Encode parameters and the ffmpeg argument list built from them.

use std::ffi::OsString;
use std::path::PathBuf;

/// Everything needed to run one encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeParams {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub video_codec: String,
    pub audio_codec: String,
    /// Target video bit rate in bits per second
    pub target_bitrate: u64,
}

/// Builds the ffmpeg argument list (without the program name).
///
/// `-err_detect ignore_err` keeps minor decode errors in damaged sources from
/// aborting the encode.
pub fn build_encode_args(params: &EncodeParams) -> Vec<OsString> {
    vec![
        "-err_detect".into(),
        "ignore_err".into(),
        "-i".into(),
        params.input_path.clone().into_os_string(),
        "-c:v".into(),
        params.video_codec.clone().into(),
        "-b:v".into(),
        params.target_bitrate.to_string().into(),
        "-c:a".into(),
        params.audio_codec.clone().into(),
        params.output_path.clone().into_os_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_encode_args() {
        let params = EncodeParams {
            input_path: PathBuf::from("/in/show s01/ep 1.mkv"),
            output_path: PathBuf::from("/out/show s01/ep 1.mkv"),
            video_codec: "hevc_nvenc".to_string(),
            audio_codec: "aac".to_string(),
            target_bitrate: 4_000_000,
        };

        let args: Vec<String> = build_encode_args(&params)
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "-err_detect",
                "ignore_err",
                "-i",
                "/in/show s01/ep 1.mkv",
                "-c:v",
                "hevc_nvenc",
                "-b:v",
                "4000000",
                "-c:a",
                "aac",
                "/out/show s01/ep 1.mkv",
            ]
        );
    }
}
