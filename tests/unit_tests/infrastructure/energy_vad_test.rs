use malacca::infrastructure::asr::EnergyVad;

const SAMPLE_RATE: u32 = 16_000;

fn silence(samples: usize) -> Vec<f32> {
    vec![0.0; samples]
}

fn tone(samples: usize) -> Vec<f32> {
    (0..samples)
        .map(|i| 0.5 * (i as f32 * 0.1).sin())
        .collect()
}

#[test]
fn given_all_silent_audio_when_trimming_then_empty_slice_and_no_offset() {
    let vad = EnergyVad::new();
    let pcm = silence(SAMPLE_RATE as usize);

    let (voiced, lead) = vad.trim_edges(&pcm, SAMPLE_RATE);

    assert!(voiced.is_empty());
    assert_eq!(lead, 0.0);
}

#[test]
fn given_empty_input_when_trimming_then_nothing_changes() {
    let vad = EnergyVad::new();
    let (voiced, lead) = vad.trim_edges(&[], SAMPLE_RATE);
    assert!(voiced.is_empty());
    assert_eq!(lead, 0.0);
}

#[test]
fn given_leading_silence_when_trimming_then_lead_offset_is_reported() {
    let vad = EnergyVad::new();
    // one second of silence, then one second of tone
    let mut pcm = silence(SAMPLE_RATE as usize);
    pcm.extend(tone(SAMPLE_RATE as usize));

    let (voiced, lead) = vad.trim_edges(&pcm, SAMPLE_RATE);

    assert!(!voiced.is_empty());
    assert!(lead > 0.8 && lead < 1.0, "lead was {lead}");
    assert!(voiced.len() < pcm.len());
}

#[test]
fn given_trailing_silence_when_trimming_then_tail_is_dropped() {
    let vad = EnergyVad::new();
    let mut pcm = tone(SAMPLE_RATE as usize);
    pcm.extend(silence(2 * SAMPLE_RATE as usize));

    let (voiced, lead) = vad.trim_edges(&pcm, SAMPLE_RATE);

    assert_eq!(lead, 0.0);
    // keeps the tone plus at most two padding frames
    assert!(voiced.len() <= SAMPLE_RATE as usize + 2 * 480);
    assert!(voiced.len() >= SAMPLE_RATE as usize);
}

#[test]
fn given_fully_voiced_audio_when_trimming_then_everything_survives() {
    let vad = EnergyVad::new();
    let pcm = tone(SAMPLE_RATE as usize);

    let (voiced, lead) = vad.trim_edges(&pcm, SAMPLE_RATE);

    assert_eq!(voiced.len(), pcm.len());
    assert_eq!(lead, 0.0);
}

#[test]
fn given_custom_threshold_when_quiet_tone_plays_then_it_counts_as_silence() {
    let strict = EnergyVad::with_threshold(0.9);
    let pcm = tone(SAMPLE_RATE as usize);

    let (voiced, _) = strict.trim_edges(&pcm, SAMPLE_RATE);

    assert!(voiced.is_empty());
}
