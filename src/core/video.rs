//! Video gallery overlay.
//!
//! Each gallery item is a poster overlay on top of a `<video>`. Clicking an
//! overlay starts that video and pauses the others; when it ends, the
//! overlay comes back and the video reloads to show its poster again.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCommand {
    HideOverlay(usize),
    ShowOverlay(usize),
    Play(usize),
    Pause(usize),
    SetControls(usize, bool),
    /// Reload so the poster frame shows again.
    Reload(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoGallery {
    len: usize,
    playing: Option<usize>,
}

impl VideoGallery {
    pub fn new(len: usize) -> Self {
        Self { len, playing: None }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn playing(&self) -> Option<usize> {
        self.playing
    }

    /// Overlay at `index` was clicked.
    pub fn play(&mut self, index: usize) -> Vec<VideoCommand> {
        if index >= self.len {
            return Vec::new();
        }
        self.playing = Some(index);

        let mut cmds = vec![
            VideoCommand::HideOverlay(index),
            VideoCommand::Play(index),
            VideoCommand::SetControls(index, true),
        ];
        cmds.extend(
            (0..self.len)
                .filter(|&i| i != index)
                .map(VideoCommand::Pause),
        );
        cmds
    }

    /// Video at `index` reached its end.
    pub fn ended(&mut self, index: usize) -> Vec<VideoCommand> {
        if index >= self.len {
            return Vec::new();
        }
        if self.playing == Some(index) {
            self.playing = None;
        }
        vec![
            VideoCommand::ShowOverlay(index),
            VideoCommand::SetControls(index, false),
            VideoCommand::Reload(index),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_pauses_every_other_video() {
        let mut g = VideoGallery::new(3);
        let cmds = g.play(1);
        assert_eq!(
            cmds,
            vec![
                VideoCommand::HideOverlay(1),
                VideoCommand::Play(1),
                VideoCommand::SetControls(1, true),
                VideoCommand::Pause(0),
                VideoCommand::Pause(2),
            ]
        );
        assert_eq!(g.playing(), Some(1));
    }

    #[test]
    fn ended_restores_overlay_and_poster() {
        let mut g = VideoGallery::new(2);
        g.play(0);
        let cmds = g.ended(0);
        assert_eq!(
            cmds,
            vec![
                VideoCommand::ShowOverlay(0),
                VideoCommand::SetControls(0, false),
                VideoCommand::Reload(0),
            ]
        );
        assert_eq!(g.playing(), None);
    }

    #[test]
    fn ending_a_background_video_keeps_current_one() {
        let mut g = VideoGallery::new(2);
        g.play(1);
        g.ended(0);
        assert_eq!(g.playing(), Some(1));
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut g = VideoGallery::new(1);
        assert!(g.play(4).is_empty());
        assert!(g.ended(4).is_empty());
        assert!(VideoGallery::default().is_empty());
        assert_eq!(g.len(), 1);
    }
}
