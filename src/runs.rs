//! Grouping of the ordered cue list into consecutive same-speaker runs.

use crate::cues::Cue;

/// A maximal run of consecutive cues sharing one speaker label. Two runs by
/// the same speaker separated by somebody else stay separate. The empty
/// label is a speaker value like any other.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeakerRun {
    pub speaker: String,
    /// Display anchor: the start time of the run's first cue.
    pub start: f64,
    pub cues: Vec<Cue>,
}

/// Single pass over the cue list; a new run begins whenever the speaker
/// differs from the previous cue's. No reordering or merging beyond that.
pub fn group_runs(cues: Vec<Cue>) -> Vec<SpeakerRun> {
    let mut runs: Vec<SpeakerRun> = Vec::new();
    for cue in cues {
        match runs.last_mut() {
            Some(run) if run.speaker == cue.speaker => run.cues.push(cue),
            _ => runs.push(SpeakerRun {
                speaker: cue.speaker.clone(),
                start: cue.start,
                cues: vec![cue],
            }),
        }
    }
    runs
}

/// Flatten runs back into the cue list they were grouped from.
pub fn flatten(runs: Vec<SpeakerRun>) -> Vec<Cue> {
    runs.into_iter().flat_map(|run| run.cues).collect()
}
