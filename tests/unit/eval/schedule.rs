use super::*;

fn fps30() -> Fps {
    Fps::integer(30).unwrap()
}

#[test]
fn default_timing_yields_360_frames() {
    let s = FrameSchedule::new(fps30(), 12.0).unwrap();
    assert_eq!(s.len(), 360);
    assert_eq!(s.iter().count(), 360);
    assert_eq!(s.range().len_frames(), 360);
}

#[test]
fn samples_span_both_ends_evenly() {
    let s = FrameSchedule::new(fps30(), 12.0).unwrap();
    assert_eq!(s.sample_time(FrameIndex(0)), 0.0);
    assert_eq!(s.sample_time(FrameIndex(359)), 12.0);

    let step = 12.0 / 359.0;
    let times: Vec<f64> = s.iter().map(|(_, t)| t).collect();
    for pair in times.windows(2) {
        assert!((pair[1] - pair[0] - step).abs() < 1e-9);
    }
}

#[test]
fn out_of_range_frames_clamp_to_last_sample() {
    let s = FrameSchedule::new(fps30(), 2.0).unwrap();
    assert_eq!(s.sample_time(FrameIndex(10_000)), 2.0);
}

#[test]
fn single_frame_samples_time_zero() {
    let s = FrameSchedule::new(Fps::integer(1).unwrap(), 1.5).unwrap();
    assert_eq!(s.len(), 1);
    assert_eq!(s.sample_time(FrameIndex(0)), 0.0);
}

#[test]
fn rejects_durations_without_frames() {
    assert!(FrameSchedule::new(fps30(), 0.0).is_err());
    assert!(FrameSchedule::new(fps30(), -3.0).is_err());
    assert!(FrameSchedule::new(fps30(), f64::NAN).is_err());
    assert!(FrameSchedule::new(Fps::integer(2).unwrap(), 0.25).is_err());
}
