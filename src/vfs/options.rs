/// The file names of the containers a [`Vfs`](crate::vfs::Vfs) loads from its data directory.
#[derive(Clone, Debug)]
pub struct Options {
    maps: String,
    blocks: String,
    monsters: String,
    music: String,
    arch: String,
    sound: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            maps: "MAPS.BSA".into(),
            blocks: "BLOCKS.BSA".into(),
            monsters: "MONSTER.BSA".into(),
            music: "MIDI.BSA".into(),
            arch: "ARCH3D.BSA".into(),
            sound: "DAGGER.SND".into(),
        }
    }
}

impl Options {
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    /// The containers searched by name, lowest priority first.
    #[must_use]
    pub fn named_archives(&self) -> [&str; 4] {
        [&self.maps, &self.blocks, &self.monsters, &self.music]
    }

    /// The container searched by architecture id.
    #[must_use]
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// The container searched by sound id.
    #[must_use]
    pub fn sound(&self) -> &str {
        &self.sound
    }
}

#[derive(Debug, Default)]
#[repr(transparent)]
pub struct OptionsBuilder(Options);

impl OptionsBuilder {
    #[must_use]
    pub fn arch(mut self, arch: impl Into<String>) -> Self {
        self.0.arch = arch.into();
        self
    }

    #[must_use]
    pub fn blocks(mut self, blocks: impl Into<String>) -> Self {
        self.0.blocks = blocks.into();
        self
    }

    #[must_use]
    pub fn build(self) -> Options {
        self.0
    }

    #[must_use]
    pub fn maps(mut self, maps: impl Into<String>) -> Self {
        self.0.maps = maps.into();
        self
    }

    #[must_use]
    pub fn monsters(mut self, monsters: impl Into<String>) -> Self {
        self.0.monsters = monsters.into();
        self
    }

    #[must_use]
    pub fn music(mut self, music: impl Into<String>) -> Self {
        self.0.music = music.into();
        self
    }

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sound(mut self, sound: impl Into<String>) -> Self {
        self.0.sound = sound.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::vfs::Options;

    #[test]
    fn default_state() {
        let options = Options::default();
        assert_eq!(
            options.named_archives(),
            ["MAPS.BSA", "BLOCKS.BSA", "MONSTER.BSA", "MIDI.BSA"]
        );
        assert_eq!(options.arch(), "ARCH3D.BSA");
        assert_eq!(options.sound(), "DAGGER.SND");
    }

    #[test]
    fn builder_overrides() {
        let options = Options::builder()
            .music("MUSIC.BSA")
            .sound("SOUNDS.SND")
            .build();
        assert_eq!(options.named_archives()[3], "MUSIC.BSA");
        assert_eq!(options.named_archives()[0], "MAPS.BSA");
        assert_eq!(options.sound(), "SOUNDS.SND");
        assert_eq!(options.arch(), "ARCH3D.BSA");
    }
}
