#[cfg(not(all(feature = "streaming", feature = "visualization")))]
fn main() {
    eprintln!(
        "The zxbeeper CLI requires the \"streaming\" and \"visualization\" features. Rebuild with default features to enable playback."
    );
}

#[cfg(all(feature = "streaming", feature = "visualization"))]
mod cli {
    use anyhow::Context;
    use std::env;
    use std::io::BufRead;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use zxbeeper::export::export_tune_to_wav;
    use zxbeeper::player::{CancelPoll, SystemClock, TunePlayer};
    use zxbeeper::streaming::DEFAULT_SAMPLE_RATE;
    use zxbeeper::visualization::TerminalKeys;
    use zxbeeper::{BeeperSound, PlayOutcome, StreamConfig, Tune, TuneStep};

    /// Demo tune: an up-and-down two-voice scale in the classic triple
    /// format (duration, freq1, freq2)
    const DEMO_TUNE: [(u8, u8, u8); 16] = [
        (50, 128, 0),
        (25, 114, 0),
        (25, 102, 0),
        (50, 96, 102),
        (25, 86, 0),
        (25, 76, 0),
        (50, 64, 76),
        (25, 76, 0),
        (25, 86, 0),
        (50, 96, 86),
        (25, 102, 0),
        (25, 114, 0),
        (50, 128, 96),
        (25, 114, 0),
        (25, 102, 0),
        (100, 128, 64),
    ];

    fn demo_tune() -> Tune {
        Tune::from_steps(
            DEMO_TUNE
                .iter()
                .map(|&(duration, freq1, freq2)| TuneStep::new(duration, freq1, freq2))
                .collect(),
        )
    }

    /// Cancel poll backed by a stdin reader thread: any entered line
    /// requests a skip
    struct EnterToSkip {
        requested: Arc<AtomicBool>,
    }

    impl EnterToSkip {
        fn spawn() -> Self {
            let requested = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&requested);
            std::thread::spawn(move || {
                let stdin = std::io::stdin();
                let mut line = String::new();
                if stdin.lock().read_line(&mut line).is_ok() {
                    flag.store(true, Ordering::Relaxed);
                }
            });
            EnterToSkip { requested }
        }
    }

    impl CancelPoll for EnterToSkip {
        fn cancel_requested(&mut self) -> bool {
            self.requested.load(Ordering::Relaxed)
        }
    }

    fn print_usage() {
        println!("Usage: zxbeeper [OPTIONS] [TUNE.json]");
        println!();
        println!("Plays the built-in demo tune, or a tune loaded from a JSON file");
        println!("of [duration, freq1, freq2] triples.");
        println!();
        println!("Options:");
        println!("  --export <FILE.wav>   Render the tune to a WAV file instead of playing");
        println!("  --no-music            Drive visuals and timing without audio");
        println!("  -h, --help            Show this help");
    }

    pub fn run() -> anyhow::Result<()> {
        println!("ZX Spectrum Beeper - Tune Playback Demo");
        println!("========================================\n");

        let mut export_path: Option<String> = None;
        let mut tune_path: Option<String> = None;
        let mut music_enabled = true;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                "--export" => {
                    export_path = args.next().or_else(|| {
                        eprintln!("--export requires a file argument");
                        None
                    });
                    if export_path.is_none() {
                        print_usage();
                        return Ok(());
                    }
                }
                "--no-music" => music_enabled = false,
                other => tune_path = Some(other.to_string()),
            }
        }

        let tune = match tune_path {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read tune file {}", path))?;
                Tune::from_json(&json)?
            }
            None => demo_tune(),
        };

        if let Some(path) = export_path {
            println!("Rendering {} steps to {}...", tune.len(), path);
            export_tune_to_wav(&tune, &path, DEFAULT_SAMPLE_RATE)?;
            println!("Export complete!");
            return Ok(());
        }

        let mut sound = BeeperSound::initialize(StreamConfig::default());
        if !sound.is_enabled() {
            println!("No audio device available; running silently.");
        }
        println!("Press Enter to skip.\n");

        let mut player = TunePlayer::new();
        player.set_music_enabled(music_enabled);

        let mut visuals = TerminalKeys::new();
        let mut input = EnterToSkip::spawn();
        let outcome = player.play(sound.engine(), &tune, &mut visuals, &mut input, &SystemClock);

        // Let the last queued notes drain before tearing the device down
        while sound.is_playing() {
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        sound.shutdown();

        match outcome {
            PlayOutcome::Completed => println!("\nTune complete."),
            PlayOutcome::Cancelled => println!("\nTune skipped."),
        }
        Ok(())
    }
}

#[cfg(all(feature = "streaming", feature = "visualization"))]
fn main() {
    if let Err(err) = cli::run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
