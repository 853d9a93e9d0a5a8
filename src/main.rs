use clap::Parser;

/// Play a rumble effect on an input device to check the vibrator by hand
#[derive(Parser, Debug)]
#[command(name = "vibtest", version)]
struct Args {
    /// N in /dev/input/eventN
    event_id: u32,
    /// Effect length in milliseconds
    time_ms: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run(&args)
}

#[cfg(target_os = "linux")]
fn run(args: &Args) -> anyhow::Result<()> {
    use anyhow::Context;
    use std::time::Duration;
    use vibrator_hal::force_feedback::{EffectDevice, EventDevice, RumbleEffect};
    use vibrator_hal::VibratorConfig;

    let config = VibratorConfig::load_or_default();
    let path = config.input_dir.join(format!("event{}", args.event_id));
    let mut device =
        EventDevice::open(&path).with_context(|| format!("open {} failed", path.display()))?;

    match device.name() {
        Ok(name) => println!("ff name: {}", name),
        Err(e) => log::warn!("Failed to query name of {}: {}", path.display(), e),
    }
    match device.try_clone_fd().and_then(evdev::Device::from_fd) {
        Ok(info) => {
            if let Some(supported_ff) = info.supported_ff() {
                let ff_types: Vec<_> = supported_ff.iter().collect();
                println!("ff effects: {:?}", ff_types);
            }
        }
        Err(e) => log::warn!("Failed to query {}: {}", path.display(), e),
    }

    let id = match device.upload(&RumbleEffect::new(None, args.time_ms)) {
        Ok(id) => Some(id),
        Err(e) => {
            println!("upload ff effect failed: {}", e);
            None
        }
    };

    if let Some(id) = id {
        if let Err(e) = device.write_event(id as u16, 1) {
            println!("write ff event failed: {}", e);
        }
    }

    std::thread::sleep(Duration::from_secs(u64::from(args.time_ms / 1000 + 1)));

    if let Some(id) = id {
        if let Err(e) = device.erase(id) {
            println!("erase ff effect failed: {}", e);
        }
    }

    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run(_args: &Args) -> anyhow::Result<()> {
    anyhow::bail!("vibtest needs Linux input devices")
}
