use clap::{Parser, Subcommand};
use docmatch_core::{
    constants::{DEFAULT_FEEDBACK_PATH, DEFAULT_ROSTER_PATH},
    key_metrics, location_histogram, profile_message, send_profile, specialty_breakdown,
    CoreConfig, DoctorId, FeedbackService, RosterService, SimulatedTransport,
};
use docmatch_types::{EmailAddress, NonEmptyText};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "docmatch")]
#[command(about = "docmatch doctor roster CLI")]
struct Cli {
    /// Path to the doctor roster CSV
    #[arg(long, default_value = DEFAULT_ROSTER_PATH)]
    roster: PathBuf,
    /// Path to the feedback log CSV
    #[arg(long, default_value = DEFAULT_FEEDBACK_PATH)]
    feedback: PathBuf,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the full roster
    List,
    /// Filter doctors by symptom and location substrings
    Find {
        /// Symptom substring (empty matches everything)
        #[arg(default_value = "")]
        symptom: String,
        /// Location substring (empty matches everything)
        #[arg(default_value = "")]
        location: String,
    },
    /// Show one doctor's full profile
    Show {
        /// Stable doctor id
        id: String,
    },
    /// Print key metrics and chart breakdowns
    Stats,
    /// Append a feedback entry
    Feedback {
        /// Submitter name
        name: String,
        /// Free-text comment
        comment: String,
    },
    /// List the feedback log
    ListFeedback,
    /// Send a doctor's profile by (simulated) email
    Email {
        /// Stable doctor id
        id: String,
        /// Recipient address
        recipient: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cfg = Arc::new(CoreConfig::new(cli.roster, cli.feedback)?);
    let roster = RosterService::load(&cfg)?;

    match cli.command {
        Some(Commands::List) => {
            if roster.is_empty() {
                println!("No doctors in the roster.");
            } else {
                for doctor in roster.all() {
                    println!(
                        "[{}] {} — {}, {}",
                        doctor.id, doctor.name, doctor.specialty, doctor.location
                    );
                }
            }
        }
        Some(Commands::Find { symptom, location }) => {
            let results = roster.find(&symptom, &location);
            if results.is_empty() {
                println!("No doctors found.");
            } else {
                for doctor in &results {
                    println!(
                        "[{}] {} — {}, {} (treats: {})",
                        doctor.id, doctor.name, doctor.specialty, doctor.location, doctor.symptoms
                    );
                }
            }
        }
        Some(Commands::Show { id }) => {
            let id: DoctorId = id.parse()?;
            match roster.get(id) {
                Some(doctor) => {
                    let (_, body) = profile_message(doctor);
                    print!("{}", body);
                }
                None => eprintln!("No doctor with id {}", id),
            }
        }
        Some(Commands::Stats) => {
            let metrics = key_metrics(roster.all());
            println!("Total doctors: {}", metrics.total_doctors);
            println!("Specialties:   {}", metrics.distinct_specialties);
            println!("Locations:     {}", metrics.distinct_locations);
            for chart in [
                location_histogram(roster.all()),
                specialty_breakdown(roster.all()),
            ] {
                println!("\n{}", chart.title);
                for slice in &chart.slices {
                    println!("  {}: {}", slice.label, slice.count);
                }
            }
        }
        Some(Commands::Feedback { name, comment }) => {
            let name = NonEmptyText::new(&name)?;
            let comment = NonEmptyText::new(&comment)?;
            let service = FeedbackService::new(cfg);
            match service.append(&name, &comment) {
                Ok(()) => println!("Feedback saved."),
                Err(e) => eprintln!("Error saving feedback: {}", e),
            }
        }
        Some(Commands::ListFeedback) => {
            let service = FeedbackService::new(cfg);
            let entries = service.load();
            if entries.is_empty() {
                println!("No feedback yet.");
            } else {
                for entry in entries {
                    println!("{}: {}", entry.name, entry.comment);
                }
            }
        }
        Some(Commands::Email { id, recipient }) => {
            let id: DoctorId = id.parse()?;
            let recipient = EmailAddress::parse(&recipient)?;
            match roster.get(id) {
                Some(doctor) => {
                    let receipt = send_profile(&SimulatedTransport, &recipient, doctor)?;
                    println!("{}", receipt.summary);
                }
                None => eprintln!("No doctor with id {}", id),
            }
        }
        None => {
            println!("Use 'docmatch --help' for commands");
        }
    }

    Ok(())
}
