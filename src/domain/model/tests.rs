// Unit tests for domain models

use super::*;

#[test]
fn test_time_spec_parse_seconds() {
    let time = TimeSpec::parse("123.456").unwrap();
    assert_eq!(time.seconds, 123.456);
}

#[test]
fn test_time_spec_parse_mm_ss() {
    let time = TimeSpec::parse("01:30.5").unwrap();
    assert_eq!(time.seconds, 90.5);
}

#[test]
fn test_time_spec_parse_hh_mm_ss() {
    let time = TimeSpec::parse("01:02:03.5").unwrap();
    assert_eq!(time.seconds, 3723.5);
}

#[test]
fn test_time_spec_parse_invalid() {
    assert!(TimeSpec::parse("invalid").is_err());
    assert!(TimeSpec::parse("00:60").is_err()); // Seconds out of range
    assert!(TimeSpec::parse("01:60:00").is_err()); // Minutes out of range
    assert!(TimeSpec::parse("-10").is_err()); // Negative time
    assert!(TimeSpec::parse("inf").is_err());
    assert!(TimeSpec::parse("1:2:3:4").is_err());
}

#[test]
fn test_time_range_invariant() {
    assert!(TimeRange::new(0.0, 2.0).is_ok());
    assert!(TimeRange::new(2.0, 2.0).is_err());
    assert!(TimeRange::new(5.0, 2.0).is_err());
    assert!(TimeRange::new(-1.0, 2.0).is_err());
    assert!(TimeRange::new(0.0, f64::NAN).is_err());
}

#[test]
fn test_time_range_needs_a_whole_millisecond() {
    let err = TimeRange::new(1.0001, 1.0004).unwrap_err();
    assert!(matches!(err, DomainError::BadArgs(_)));
    assert!("1.0001-1.0004".parse::<TimeRange>().is_err());
    assert!(TimeRange::new(1.0, 1.001).is_ok());
    assert_eq!(whole_millis(1.0004), 1000);
    assert_eq!(whole_millis(2.5), 2500);
    assert_eq!(whole_millis(-3.0), 0);
}

#[test]
fn test_time_range_validate_catches_deserialized_ranges() {
    let range: TimeRange = serde_json::from_str(r#"{"start": 4.0, "end": 1.0}"#).unwrap();
    assert!(matches!(range.validate(), Err(DomainError::BadArgs(_))));
}

#[test]
fn test_time_range_parse() {
    let range: TimeRange = "5-10.5".parse().unwrap();
    assert_eq!(range, TimeRange { start: 5.0, end: 10.5 });

    let range: TimeRange = "0:05-01:00:10".parse().unwrap();
    assert_eq!(range.start, 5.0);
    assert_eq!(range.end, 3610.0);

    assert!("10".parse::<TimeRange>().is_err());
    assert!("10-5".parse::<TimeRange>().is_err());
}

#[test]
fn test_time_range_overlap() {
    let a = TimeRange::new(0.0, 5.0).unwrap();
    let b = TimeRange::new(5.0, 8.0).unwrap();
    let c = TimeRange::new(4.0, 6.0).unwrap();
    assert!(!a.overlaps(&b)); // Touching ranges do not overlap
    assert!(a.overlaps(&c));
    assert!(c.overlaps(&b));
}

#[test]
fn test_frame_rate_rational() {
    let rate: FrameRate = "30000/1001".parse().unwrap();
    assert_eq!(rate, FrameRate { num: 30000, den: 1001 });
    assert!((rate.as_f64() - 29.97).abs() < 0.001);

    let rate: FrameRate = "25".parse().unwrap();
    assert_eq!(rate.as_f64(), 25.0);
}

#[test]
fn test_frame_rate_rejects_non_rational_input() {
    assert!(matches!(
        "0/0".parse::<FrameRate>(),
        Err(DomainError::ProbeFail(_))
    ));
    assert!("__import__('os')".parse::<FrameRate>().is_err());
    assert!("30/1+1".parse::<FrameRate>().is_err());
    assert!("-30/1".parse::<FrameRate>().is_err());
}

#[test]
fn test_subtitle_format_parse() {
    assert_eq!(SubtitleFormat::parse("srt").unwrap(), SubtitleFormat::Srt);
    assert_eq!(SubtitleFormat::parse("VTT").unwrap(), SubtitleFormat::WebVtt);
    assert_eq!(SubtitleFormat::parse("webvtt").unwrap(), SubtitleFormat::WebVtt);
    assert!(SubtitleFormat::parse("ass").is_err());
    assert_eq!(SubtitleFormat::WebVtt.extension(), "vtt");
}

#[test]
fn test_transcription_result_defaults() {
    let result: TranscriptionResult = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
    assert_eq!(result.text, "hello");
    assert!(result.segments.is_empty());
    assert!(result.language.is_none());
    assert!(result.duration.is_none());
}
