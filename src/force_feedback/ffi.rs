use std::fmt;

// Event types
pub const EV_FF: u16 = 0x15;

// Force feedback effect types
pub const FF_RUMBLE: u16 = 0x50;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FfTrigger {
    pub button: u16,
    pub interval: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FfReplay {
    pub length: u16,
    pub delay: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FfRumbleEffect {
    pub strong_magnitude: u16,
    pub weak_magnitude: u16,
}

// Sized like the kernel union, whose largest member (ff_periodic_effect)
// carries a pointer.
#[repr(C)]
#[derive(Clone, Copy)]
pub union FfEffectUnion {
    pub rumble: FfRumbleEffect,
    #[cfg(target_pointer_width = "64")]
    padding: [u64; 4],
    #[cfg(target_pointer_width = "32")]
    padding: [u32; 7],
}

impl fmt::Debug for FfEffectUnion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(unsafe { &self.padding }, f)
    }
}

/// `struct ff_effect`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FfEffect {
    pub type_: u16,
    pub id: i16,
    pub direction: u16,
    pub trigger: FfTrigger,
    pub replay: FfReplay,
    pub u: FfEffectUnion,
}

impl FfEffect {
    pub fn rumble(id: i16, replay: FfReplay, rumble: FfRumbleEffect) -> Self {
        #[cfg(target_pointer_width = "64")]
        let mut u = FfEffectUnion { padding: [0; 4] };
        #[cfg(target_pointer_width = "32")]
        let mut u = FfEffectUnion { padding: [0; 7] };
        u.rumble = rumble;

        Self {
            type_: FF_RUMBLE,
            id,
            direction: 0,
            trigger: FfTrigger::default(),
            replay,
            u,
        }
    }
}

nix::ioctl_read_buf!(eviocgname, b'E', 0x06, u8);

// EVIOCSFF writes the allocated id back into the effect
nix::ioctl_write_ptr!(eviocsff, b'E', 0x80, FfEffect);
nix::ioctl_write_int!(eviocrmff, b'E', 0x81);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_matches_kernel_layout() {
        #[cfg(target_pointer_width = "64")]
        assert_eq!(std::mem::size_of::<FfEffect>(), 48);
        #[cfg(target_pointer_width = "32")]
        assert_eq!(std::mem::size_of::<FfEffect>(), 44);
        assert_eq!(std::mem::size_of::<FfRumbleEffect>(), 4);
    }

    #[test]
    fn rumble_sets_type_and_magnitudes() {
        let effect = FfEffect::rumble(
            -1,
            FfReplay {
                length: 50,
                delay: 0,
            },
            FfRumbleEffect {
                strong_magnitude: 0,
                weak_magnitude: 1,
            },
        );
        assert_eq!(effect.type_, FF_RUMBLE);
        assert_eq!(effect.id, -1);
        assert_eq!(effect.replay.length, 50);
        let rumble = unsafe { effect.u.rumble };
        assert_eq!(rumble.weak_magnitude, 1);
        assert_eq!(rumble.strong_magnitude, 0);
    }
}
