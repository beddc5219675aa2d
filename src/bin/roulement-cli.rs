#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use roulement::{
    config, io,
    model::{AbsenceKind, CoverageEvent, Month, MonthSchedule, Roster, StaffMember, WorkShift},
    render::{ScheduleRenderer, TextGrid},
    scheduler::{self, GenerateOptions, Scheduler, ViolationKind},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planning mensuel 1re/2e équipe (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter ou mettre à jour un membre (clé : le nom)
    StaffAdd {
        #[arg(long)]
        name: String,
        #[arg(long)]
        part_time: bool,
        #[arg(long)]
        no_on_call: bool,
        #[arg(long)]
        no_support: bool,
    },

    /// Retirer un membre (et ses absences / cases enregistrées)
    StaffRemove {
        #[arg(long)]
        name: String,
    },

    /// Lister le personnel dans l'ordre de génération
    StaffList,

    /// Importer du personnel depuis un CSV
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Importer des absences depuis un CSV
    ImportAbsences {
        #[arg(long)]
        csv: String,
    },

    /// Déclarer une absence (vacation, sick, training)
    AbsenceAdd {
        #[arg(long)]
        name: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        kind: AbsenceKind,
    },

    /// Déclarer un renfort fixe
    EventAdd {
        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// 1 ou 2 ; absent = toute la journée
        #[arg(long)]
        shift: Option<WorkShift>,
        #[arg(long, default_value_t = 1)]
        required: u32,
    },

    /// Générer (et enregistrer) le planning d'un mois
    Generate {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Règles JSON (ratio 2e équipe, taille minimale)
        #[arg(long)]
        config: Option<String>,
    },

    /// Afficher le planning enregistré d'un mois
    Show {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },

    /// Faire tourner l'étiquette d'une case (1 → 2 → repos → 1)
    Cycle {
        #[arg(long)]
        name: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        day: u32,
    },

    /// Poser ou retirer une astreinte
    ToggleOnCall {
        #[arg(long)]
        name: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        day: u32,
    },

    /// Exporter un planning enregistré
    Export {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier les invariants d'un planning enregistré
    Check {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Export CSV des anomalies (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn saved_month(roster: &Roster, year: i32, month: u32) -> Result<(Month, MonthSchedule)> {
    let month = Month::new(year, month)?;
    let schedule = roster
        .load_month(month)
        .with_context(|| format!("no schedule saved for {month}, run `generate` first"))?;
    Ok((month, schedule))
}

fn staff_id(roster: &Roster, name: &str) -> Result<roulement::StaffId> {
    roster
        .find_staff_by_name(name)
        .map(|s| s.id.clone())
        .ok_or_else(|| anyhow::anyhow!("unknown staff member: {}", name))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster)?;
    let mut roster = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::StaffAdd {
            name,
            part_time,
            no_on_call,
            no_support,
        } => {
            let mut member = if part_time {
                StaffMember::part_timer(name)
            } else {
                StaffMember::new(name)
            };
            member.can_on_call &= !no_on_call;
            member.can_support &= !no_support;
            roster.upsert_staff(member);
            storage.save(&roster)?;
            0
        }
        Commands::StaffRemove { name } => {
            roster.remove_staff(&name)?;
            storage.save(&roster)?;
            0
        }
        Commands::StaffList => {
            for s in &roster.staff {
                println!(
                    "{} | {} | part_time={} on_call={} support={}",
                    s.id.as_str(),
                    s.name,
                    s.part_time,
                    s.can_on_call,
                    s.can_support
                );
            }
            0
        }
        Commands::ImportStaff { csv } => {
            for member in io::import_staff_csv(csv)? {
                roster.upsert_staff(member);
            }
            storage.save(&roster)?;
            0
        }
        Commands::ImportAbsences { csv } => {
            for (name, date, kind) in io::import_absences_csv(csv)? {
                roster.add_absence(&name, date, kind)?;
            }
            storage.save(&roster)?;
            0
        }
        Commands::AbsenceAdd { name, date, kind } => {
            roster.add_absence(&name, date, kind)?;
            storage.save(&roster)?;
            0
        }
        Commands::EventAdd {
            date,
            shift,
            required,
        } => {
            roster.add_event(CoverageEvent {
                date,
                shift,
                required,
            });
            storage.save(&roster)?;
            0
        }
        Commands::Generate {
            year,
            month,
            config: rules,
        } => {
            let month = Month::new(year, month)?;
            let opts = match rules {
                Some(path) => config::load_options(path)?,
                None => GenerateOptions::default(),
            };
            if roster.staff.is_empty() {
                bail!("aucun membre du personnel (staff-add ou import-staff)");
            }
            let constraints = roster.constraints_for(month);
            let schedule = Scheduler::new(opts).generate(&roster.staff, month, &constraints);
            roster.save_month(&schedule)?;
            storage.save(&roster)?;
            print!("{}", TextGrid::default().render(&schedule, &roster.staff)?);
            0
        }
        Commands::Show { year, month } => {
            let (_, schedule) = saved_month(&roster, year, month)?;
            print!("{}", TextGrid::default().render(&schedule, &roster.staff)?);
            0
        }
        Commands::Cycle {
            name,
            year,
            month,
            day,
        } => {
            let (_, mut schedule) = saved_month(&roster, year, month)?;
            let id = staff_id(&roster, &name)?;
            let label = scheduler::cycle_shift(&mut schedule, &roster.staff, &id, day)?;
            roster.save_month(&schedule)?;
            storage.save(&roster)?;
            println!("{name} day {day}: {}", if label.code().is_empty() { "-" } else { label.code() });
            0
        }
        Commands::ToggleOnCall {
            name,
            year,
            month,
            day,
        } => {
            let (_, mut schedule) = saved_month(&roster, year, month)?;
            let id = staff_id(&roster, &name)?;
            let on = scheduler::toggle_on_call(&mut schedule, &roster.staff, &id, day)?;
            roster.save_month(&schedule)?;
            storage.save(&roster)?;
            println!("{name} day {day}: on call {}", if on { "on" } else { "off" });
            0
        }
        Commands::Export {
            year,
            month,
            out_json,
            out_csv,
        } => {
            let (_, schedule) = saved_month(&roster, year, month)?;
            if let Some(path) = out_json {
                io::export_schedule_json(path, &schedule)?;
            }
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &schedule, &roster.staff)?;
            }
            0
        }
        Commands::Check {
            year,
            month,
            report,
        } => {
            let (_, schedule) = saved_month(&roster, year, month)?;
            let violations = scheduler::check(&schedule, &roster.staff)?;
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["staff_id", "day", "kind"])?;
                    for v in &violations {
                        w.write_record([
                            v.staff.as_str(),
                            v.day.to_string().as_str(),
                            match v.kind {
                                ViolationKind::MissingEntry => "missing",
                                ViolationKind::OnCallOffShift => "on_call_off_shift",
                                ViolationKind::DuplicateOnCall => "duplicate_on_call",
                                ViolationKind::PartTimeSecondShift => "part_time_second",
                                ViolationKind::PartTimeOnCall => "part_time_on_call",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}
