use chrono::Local;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands, NotesCommand, ProfileCommand};
use crate::display::{print_archive, print_profiles, print_task_list, print_task_view};
use crate::error::{Error, Result};
use crate::export::export_tasks;
use crate::filter::{FilterCriteria, apply, overdue};
use crate::model::{Task, TaskDraft, TaskPatch};
use crate::notes::NoteDocument;
use crate::profile::ProfileManager;
use crate::reorder::shifted_index;
use crate::store::TaskStore;
use crate::util::{default_due, parse_due};

/// Logs go to stderr so stdout only carries the rendered view.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mindnav=warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

pub fn run() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = execute(cli) {
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
}

fn execute(cli: Cli) -> Result<()> {
    let color = !cli.no_color;
    let now = Local::now().naive_local();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
        }

        Commands::Add {
            title,
            desc,
            due,
            priority,
            important,
        } => {
            let due_at = match due {
                Some(raw) => parse_due(&raw).map_err(Error::Validation)?,
                None => default_due(),
            };
            let mut store = TaskStore::open(&cli.tasks_file);
            let task = store.create(TaskDraft {
                description: desc,
                priority,
                important,
                ..TaskDraft::new(title, due_at)
            })?;
            println!("Added #{} at position {}", task.id, task.order);
        }

        Commands::Edit {
            id,
            title,
            desc,
            due,
            priority,
        } => {
            let patch = TaskPatch {
                title,
                description: desc,
                due_at: due
                    .as_deref()
                    .map(parse_due)
                    .transpose()
                    .map_err(Error::Validation)?,
                priority,
                important: None,
            };
            if patch.is_empty() {
                return Err(Error::validation("nothing to change"));
            }
            let mut store = TaskStore::open(&cli.tasks_file);
            let task = store.update(id, patch)?;
            print_task_view(&task, now, color);
        }

        Commands::List {
            priority,
            important,
            hide_done,
            query,
            sort,
            desc,
        } => {
            let store = TaskStore::open(&cli.tasks_file);
            let criteria = FilterCriteria {
                priority,
                important_only: important,
                include_done: hide_done.then_some(false),
                query,
                sort,
                desc,
            };
            let view = apply(store.list(), &criteria);
            print_task_list(&view, now, color);
        }

        Commands::Show { id } => {
            let store = TaskStore::open(&cli.tasks_file);
            let task = store.get(id).ok_or_else(|| Error::task_not_found(id))?;
            print_task_view(task, now, color);
        }

        Commands::Done { id } => {
            let mut store = TaskStore::open(&cli.tasks_file);
            let entry = store.toggle_done(id)?;
            println!("Archived #{} {}", entry.task.id, entry.task.title);
        }

        Commands::Star { id } => {
            let mut store = TaskStore::open(&cli.tasks_file);
            let task = store.toggle_important(id)?;
            let state = if task.important { "starred" } else { "unstarred" };
            println!("#{} {state}", task.id);
        }

        Commands::Move { id, index, by } => {
            let mut store = TaskStore::open(&cli.tasks_file);
            let target = match (index, by) {
                (Some(index), _) => index,
                (None, Some(delta)) => {
                    let current = store.get(id).ok_or_else(|| Error::task_not_found(id))?;
                    shifted_index(current.order, delta, store.list().len())
                }
                (None, None) => return Err(Error::validation("give a position or --by")),
            };
            store.move_to(id, target)?;
            debug!(id, target, "move command done");
            let view = apply(store.list(), &FilterCriteria::default());
            print_task_list(&view, now, color);
        }

        Commands::Rm { id } => {
            let mut store = TaskStore::open(&cli.tasks_file);
            store.remove(id)?;
            println!("Deleted #{id}");
        }

        Commands::Archive => {
            let store = TaskStore::open(&cli.tasks_file);
            print_archive(store.list_archive(), color);
        }

        Commands::Overdue => {
            let store = TaskStore::open(&cli.tasks_file);
            print_task_list(&overdue(store.list(), now), now, color);
        }

        Commands::Export { format, archive } => {
            let store = TaskStore::open(&cli.tasks_file);
            let view: Vec<&Task> = if archive {
                store.list_archive().iter().map(|e| &e.task).collect()
            } else {
                apply(store.list(), &FilterCriteria::default())
            };
            let mut stdout = std::io::stdout().lock();
            export_tasks(&mut stdout, &view, format, now)
                .map_err(|e| Error::persistence("<stdout>", e))?;
        }

        Commands::Profile { command } => {
            let mut profiles = ProfileManager::load(&cli.config_file);
            match command.unwrap_or(ProfileCommand::List) {
                ProfileCommand::List => {
                    print_profiles(profiles.profiles(), profiles.current(), color);
                }
                ProfileCommand::Add { name, notes_file } => {
                    profiles.add_profile(&name, &notes_file)?;
                    profiles.save()?;
                    println!("Added profile '{}'", name.trim());
                }
                ProfileCommand::Switch { name } => {
                    let notes_path = profiles.switch_profile(&name)?.to_path_buf();
                    profiles.save()?;
                    let notes = NoteDocument::load(notes_path)?;
                    println!(
                        "Switched to '{name}' ({}, {} lines)",
                        notes.path().display(),
                        notes.content.lines().count()
                    );
                }
                ProfileCommand::Delete { name } => {
                    let reload = profiles.delete_profile(&name)?.map(|p| p.to_path_buf());
                    profiles.save()?;
                    println!("Deleted profile '{name}'");
                    if let Some(path) = reload {
                        println!("Now on '{}' ({})", profiles.current(), path.display());
                    }
                }
            }
        }

        Commands::Notes { command } => {
            let profiles = ProfileManager::load(&cli.config_file);
            let mut notes = NoteDocument::load(profiles.notes_path())?;
            match command.unwrap_or(NotesCommand::Show) {
                NotesCommand::Show => print!("{}", notes.content),
                NotesCommand::Write { text } => {
                    notes.content = text;
                    notes.save()?;
                }
                NotesCommand::Append { text } => {
                    notes.append_line(&text);
                    notes.save()?;
                }
            }
        }
    }

    Ok(())
}
