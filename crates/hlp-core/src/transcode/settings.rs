//! Fixed encoding preset expressed as MediaConvert job settings.

use super::TranscodeJob;
use aws_sdk_mediaconvert::error::BuildError;
use aws_sdk_mediaconvert::types::{
    AacCodingMode, AacSettings, AccelerationMode, AccelerationSettings, AudioCodec, AudioCodecSettings, AudioDefaultSelection,
    AudioDescription, AudioSelector, ContainerSettings, ContainerType, FileGroupSettings,
    H264CodecProfile, H264QualityTuningLevel, H264RateControlMode, H264Settings, Input,
    JobSettings, Mp4Settings, Output, OutputGroup, OutputGroupSettings, OutputGroupType,
    ScalingBehavior, StatusUpdateInterval, VideoCodec, VideoCodecSettings, VideoDescription, VideoSelector,
    VideoTimecodeInsertion,
};

pub const AUDIO_SELECTOR: &str = "Audio Selector 1";
pub const OUTPUT_GROUP_NAME: &str = "File Group";
/// Video bitrate, bits per second.
pub const VIDEO_BITRATE: i32 = 5_000_000;
/// Audio bitrate, bits per second.
pub const AUDIO_BITRATE: i32 = 64_000;
pub const AUDIO_SAMPLE_RATE: i32 = 48_000;
pub const JOB_PRIORITY: i32 = 0;

/// Jobs run without accelerated transcoding.
pub fn acceleration_settings() -> Result<AccelerationSettings, BuildError> {
    Ok(AccelerationSettings::builder()
        .mode(AccelerationMode::Disabled)
        .build())
}

pub fn status_update_interval() -> StatusUpdateInterval {
    StatusUpdateInterval::Seconds60
}

/// Single input, single MP4 file output (H.264 MAIN CBR + AAC 2.0).
pub fn job_settings(job: &TranscodeJob) -> JobSettings {
    let input = Input::builder()
        .audio_selectors(
            AUDIO_SELECTOR,
            AudioSelector::builder()
                .default_selection(AudioDefaultSelection::Default)
                .build(),
        )
        .file_input(&job.input)
        .video_selector(VideoSelector::builder().build())
        .build();

    let video = VideoDescription::builder()
        .codec_settings(
            VideoCodecSettings::builder()
                .codec(VideoCodec::H264)
                .h264_settings(
                    H264Settings::builder()
                        .bitrate(VIDEO_BITRATE)
                        .rate_control_mode(H264RateControlMode::Cbr)
                        .quality_tuning_level(H264QualityTuningLevel::SinglePass)
                        .codec_profile(H264CodecProfile::Main)
                        .build(),
                )
                .build(),
        )
        .scaling_behavior(ScalingBehavior::Default)
        .timecode_insertion(VideoTimecodeInsertion::Disabled)
        .build();

    let audio = AudioDescription::builder()
        .codec_settings(
            AudioCodecSettings::builder()
                .codec(AudioCodec::Aac)
                .aac_settings(
                    AacSettings::builder()
                        .bitrate(AUDIO_BITRATE)
                        .coding_mode(AacCodingMode::CodingMode20)
                        .sample_rate(AUDIO_SAMPLE_RATE)
                        .build(),
                )
                .build(),
        )
        .build();

    let output = Output::builder()
        .container_settings(
            ContainerSettings::builder()
                .container(ContainerType::Mp4)
                .mp4_settings(Mp4Settings::builder().build())
                .build(),
        )
        .video_description(video)
        .audio_descriptions(audio)
        .build();

    let group = OutputGroup::builder()
        .name(OUTPUT_GROUP_NAME)
        .output_group_settings(
            OutputGroupSettings::builder()
                .r#type(OutputGroupType::FileGroupSettings)
                .file_group_settings(
                    FileGroupSettings::builder()
                        .destination(&job.output)
                        .build(),
                )
                .build(),
        )
        .outputs(output)
        .build();

    JobSettings::builder()
        .inputs(input)
        .output_groups(group)
        .build()
}
