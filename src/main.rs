#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::fs;
    use std::io::{self, Write};
    use std::path::PathBuf;
    use std::rc::Rc;
    use std::thread;
    use std::time::Duration;

    use clap::{ArgAction, Parser, Subcommand, ValueEnum};
    use strum::IntoEnumIterator;

    use demo_wheel::assignment::format_date_short;
    use demo_wheel::csv_export::write_spins_csv;
    use demo_wheel::error::WheelError;
    use demo_wheel::roster::weeks_between;
    use demo_wheel::session::{Session, SessionOptions};
    use demo_wheel::storage::FileStorage;
    use demo_wheel::wheel::clock::SystemClock;
    use demo_wheel::wheel::geometry::landed_index;
    use demo_wheel::wheel::{SpinOutcome, WheelKind};

    const FRAME: Duration = Duration::from_millis(16);

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Spin the demo wheels", long_about = None)]
    struct Args {
        /// Where the roster, settings and history are kept
        #[arg(long, default_value = ".demo-wheel")]
        data_dir: PathBuf,

        /// Seed the wheels for a reproducible spin
        #[arg(long)]
        seed: Option<u64>,

        /// Settle instantly without animation
        #[arg(long)]
        reduced_motion: bool,

        /// No sounds this run
        #[arg(long)]
        mute: bool,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Spin all three wheels and show the assignment
        Spin {
            /// Post the assignment card to Slack
            #[arg(long)]
            post: bool,
            /// Put everyone on the wheel, ignoring cooldown and OOO
            #[arg(long)]
            everyone: bool,
        },
        /// Show or change the roster
        Roster {
            #[command(subcommand)]
            action: RosterAction,
        },
        /// Show or change the settings
        Settings {
            #[arg(long)]
            cooldown: Option<u32>,
            /// Slack incoming webhook URL, empty to clear
            #[arg(long)]
            webhook: Option<String>,
            #[arg(long)]
            sounds: Option<bool>,
            #[arg(long)]
            reduced_motion: Option<bool>,
        },
        /// Switch a capability or platform on or off
        Toggle {
            wheel: ToggleWheel,
            option: String,
            #[arg(action = ArgAction::Set)]
            enabled: bool,
        },
        /// Recent spins and assignments
        History,
        /// Write the spin history as CSV
        Export { file: PathBuf },
        /// Forget everything stored
        Reset,
    }

    #[derive(Subcommand, Debug)]
    enum RosterAction {
        Show,
        /// Replace the roster with the names in a file, one per line
        Set { file: PathBuf },
        /// Mark someone out of office, or back
        Ooo {
            name: String,
            #[arg(action = ArgAction::Set)]
            ooo: bool,
        },
    }

    #[derive(ValueEnum, Clone, Copy, Debug)]
    enum ToggleWheel {
        Capability,
        Platform,
    }

    impl From<ToggleWheel> for WheelKind {
        fn from(wheel: ToggleWheel) -> Self {
            match wheel {
                ToggleWheel::Capability => WheelKind::Capability,
                ToggleWheel::Platform => WheelKind::Platform,
            }
        }
    }

    pub fn run() {
        env_logger::init();
        let args = Args::parse();
        if let Err(error) = execute(args) {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }

    fn execute(args: Args) -> Result<(), WheelError> {
        let options = SessionOptions {
            seed: args.seed,
            reduced_motion: args.reduced_motion.then_some(true),
            muted: args.mute,
        };
        let storage = FileStorage::new(&args.data_dir);
        let mut session = Session::open(storage, Rc::new(SystemClock::default()), options)?;
        match args.command {
            Command::Spin { post, everyone } => spin(&mut session, post, everyone)?,
            Command::Roster { action } => match action {
                RosterAction::Show => show_roster(&session),
                RosterAction::Set { file } => {
                    session.replace_roster(&fs::read_to_string(file)?)?;
                    show_roster(&session);
                }
                RosterAction::Ooo { name, ooo } => {
                    session.set_ooo(&name, ooo)?;
                    show_roster(&session);
                }
            },
            Command::Settings {
                cooldown,
                webhook,
                sounds,
                reduced_motion,
            } => {
                let mut settings = session.settings().clone();
                if let Some(weeks) = cooldown {
                    settings.cooldown_weeks = weeks;
                }
                if let Some(url) = webhook {
                    settings.slack_webhook = Some(url).filter(|url| !url.trim().is_empty());
                }
                if let Some(enabled) = sounds {
                    settings.sounds_enabled = enabled;
                }
                if let Some(reduced) = reduced_motion {
                    settings.reduced_motion = reduced;
                }
                session.update_settings(settings)?;
                println!("{:#?}", session.settings());
            }
            Command::Toggle {
                wheel,
                option,
                enabled,
            } => {
                session.update_toggles(wheel.into(), &option, enabled)?;
                let kind = WheelKind::from(wheel);
                println!("{kind}: {}", session.wheel(kind).eligible().join(", "));
            }
            Command::History => history(&session),
            Command::Export { file } => {
                write_spins_csv(&session.store().load_spins(), &file)?;
            }
            Command::Reset => {
                session.reset_all()?;
                println!("Everything forgotten.");
            }
        }
        Ok(())
    }

    fn spin(session: &mut Session<FileStorage>, post: bool, everyone: bool) -> Result<(), WheelError> {
        if everyone {
            session.override_all();
        }
        if session.no_eligible_people() {
            println!("Nobody is eligible right now. Spin with --everyone to include all people.");
            return Ok(());
        }
        for kind in WheelKind::iter() {
            if session.spin(kind) == SpinOutcome::NoEligibleOptions {
                println!("{kind}: every option is switched off");
            }
        }
        while session.frame() {
            show_pointers(session);
            thread::sleep(FRAME);
        }
        show_pointers(session);
        println!();
        for notice in session.take_notices() {
            eprintln!("{notice}");
        }
        let Some(card) = session.card_text() else {
            println!("No assignment this time.");
            return Ok(());
        };
        println!("{card}");
        if post {
            session.post_assignment()?;
            println!("Posted to Slack.");
        }
        Ok(())
    }

    /// One status line with what each pointer points at
    fn show_pointers(session: &Session<FileStorage>) {
        let line = WheelKind::iter()
            .map(|kind| {
                let wheel = session.wheel(kind);
                let face = wheel.face();
                let under = match (wheel.is_spinning(), wheel.selected()) {
                    (false, Some(selected)) => selected,
                    _ if face.is_empty() => "-",
                    _ => face[landed_index(wheel.angle(), face.len())].as_str(),
                };
                format!("{kind}: {under:<24}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        print!("\r{line}");
        flush_status_line(&mut io::stdout());
    }

    /// The status line has no newline; a failed flush only delays it
    pub(super) fn flush_status_line(out: &mut dyn Write) -> bool {
        match out.flush() {
            Ok(()) => true,
            Err(error) => {
                log::debug!("status line not flushed: {error}");
                false
            }
        }
    }

    fn show_roster(session: &Session<FileStorage>) {
        let now = chrono::Utc::now();
        let cooldown = session.settings().cooldown_weeks;
        for person in session.persons() {
            let last = person
                .last_demo
                .map(format_date_short)
                .unwrap_or_else(|| "never".to_string());
            let status = if person.ooo {
                "OOO".to_string()
            } else if person.is_eligible(cooldown, now) {
                "eligible".to_string()
            } else {
                format!("cooling down, {:.1} weeks", weeks_between(person.last_demo, now))
            };
            println!("{:>3}  {:<24} last demo {last:<14} {status}", person.id, person.name);
        }
    }

    fn history(session: &Session<FileStorage>) {
        let store = session.store();
        println!("Assignments:");
        for assignment in store.load_assignments() {
            let name = session
                .persons()
                .iter()
                .find(|person| person.id == assignment.person_id)
                .map(|person| person.name.as_str())
                .unwrap_or(assignment.person_id.as_str());
            println!(
                "  {}  {name} / {} / {}",
                format_date_short(assignment.next_sync),
                assignment.capability,
                assignment.platform
            );
        }
        println!("Spins:");
        for spin in store.load_spins() {
            let value = [&spin.person_id, &spin.capability, &spin.platform]
                .into_iter()
                .flatten()
                .next()
                .map(String::as_str)
                .unwrap_or_default();
            println!("  {}  {value}", spin.ts.format("%Y-%m-%d %H:%M:%S"));
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::io::{self, Write};

    use super::cli::flush_status_line;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_failed_flush_is_tolerated() {
        assert!(!flush_status_line(&mut ClosedPipe));
        assert!(flush_status_line(&mut Vec::new()));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    cli::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
