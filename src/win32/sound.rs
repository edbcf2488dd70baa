// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};
use windows_sys::Win32::Media::Audio::{PlaySoundW, SND_ASYNC, SND_FILENAME, SND_NODEFAULT};

use super::util;
use crate::{
    error::SoundError,
    host::{SoundPlayer, SoundRequest},
};

/// Plays notification sounds through `PlaySoundW`.
///
/// `PlaySoundW` only understands wave files, so a request for
/// `sounds/error.mp3` plays `sounds/error.wav`. It has no volume control,
/// the requested volume is ignored. A missing file fails instead of falling
/// back to the system beep.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Sound;

impl Win32Sound {
    /// The wave file played for a requested asset.
    pub fn wave_path(path: &Path) -> PathBuf {
        path.with_extension("wav")
    }
}

impl SoundPlayer for Win32Sound {
    fn play(&mut self, request: &SoundRequest) -> Result<(), SoundError> {
        let wave = Self::wave_path(&request.path);
        let path = util::encode_wide(&wave);
        let played = unsafe {
            PlaySoundW(path.as_ptr(), 0, SND_ASYNC | SND_FILENAME | SND_NODEFAULT)
        };
        if played == 0 {
            return Err(SoundError::Playback(wave.display().to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_wave_files_for_requested_assets() {
        assert_eq!(
            Win32Sound::wave_path(Path::new("/sounds/error.mp3")),
            PathBuf::from("/sounds/error.wav")
        );
        assert_eq!(
            Win32Sound::wave_path(Path::new(r"C:\app\sounds\info")),
            PathBuf::from(r"C:\app\sounds\info.wav")
        );
        assert_eq!(
            Win32Sound::wave_path(Path::new("chime.wav")),
            PathBuf::from("chime.wav")
        );
    }
}
