//! Command dispatch against one loaded store.

use crate::cli::{Cli, Command, ProjectArgs, ProjectCommand};
use anyhow::{anyhow, bail, Context, Result};
use folio_core::{
    fields, init_logging, project_cards, resolve_natural_key, AccessGate, BlogPost,
    CategoryFilter, ChartPointEdit, Credential, EditTarget, ExpertiseItem, FileDocumentSource,
    FolioConfig, FormRecord, PortfolioStore, Project, ProjectEditor, RecordEditor, Section, SectionRecord,
    SectionService, SqliteLocalStorage, Testimonial,
};
use log::info;
use std::path::{Path, PathBuf};

type CliStore = PortfolioStore<SqliteLocalStorage, FileDocumentSource>;

pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    start_logging(&config, cli.verbose)?;

    let gate = AccessGate::new(config.admin_password.clone());
    if is_admin_command(&cli.command) {
        let attempt = cli
            .password
            .as_deref()
            .ok_or_else(|| anyhow!("this command needs the admin password (--password)"))?;
        gate.check(attempt)?;
    }

    if let Command::Fields { section } = &cli.command {
        print_fields(section);
        return Ok(());
    }

    if let Some(parent) = config.storage_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating storage directory `{}`", parent.display()))?;
    }
    let storage = SqliteLocalStorage::open(&config.storage_path)
        .with_context(|| format!("opening `{}`", config.storage_path.display()))?;
    let mut store = PortfolioStore::load(storage, FileDocumentSource::new(&config.bundle_path))?;

    match cli.command {
        Command::Status => print_status(&store),
        Command::Fields { .. } => {}
        Command::List { section } => match parse_section(&section)? {
            Section::Projects => list_records::<Project>(&store),
            Section::Expertise => list_records::<ExpertiseItem>(&store),
            Section::Credentials => list_records::<Credential>(&store),
            Section::Testimonials => list_records::<Testimonial>(&store),
            Section::BlogPosts => list_records::<BlogPost>(&store),
        },
        Command::Kpis { category } => print_kpis(&store, category),
        Command::Add { section, sets } => match flat_section(&section)? {
            Section::Expertise => add_record::<ExpertiseItem>(&mut store, &sets)?,
            Section::Credentials => add_record::<Credential>(&mut store, &sets)?,
            Section::Testimonials => add_record::<Testimonial>(&mut store, &sets)?,
            Section::BlogPosts => add_record::<BlogPost>(&mut store, &sets)?,
            Section::Projects => unreachable_projects()?,
        },
        Command::Edit { section, key, sets } => match flat_section(&section)? {
            Section::Expertise => edit_record::<ExpertiseItem>(&mut store, &key, &sets)?,
            Section::Credentials => edit_record::<Credential>(&mut store, &key, &sets)?,
            Section::Testimonials => edit_record::<Testimonial>(&mut store, &key, &sets)?,
            Section::BlogPosts => edit_record::<BlogPost>(&mut store, &key, &sets)?,
            Section::Projects => unreachable_projects()?,
        },
        Command::Delete { section, key } => match parse_section(&section)? {
            Section::Projects => delete_record::<Project>(&mut store, &key)?,
            Section::Expertise => delete_record::<ExpertiseItem>(&mut store, &key)?,
            Section::Credentials => delete_record::<Credential>(&mut store, &key)?,
            Section::Testimonials => delete_record::<Testimonial>(&mut store, &key)?,
            Section::BlogPosts => delete_record::<BlogPost>(&mut store, &key)?,
        },
        Command::Project(ProjectCommand::Add(args)) => {
            save_project(&mut store, EditTarget::New, args)?
        }
        Command::Project(ProjectCommand::Edit { id, args }) => {
            let existing = store
                .document()
                .project(id)
                .cloned()
                .ok_or_else(|| anyhow!("no project with id {id}"))?;
            save_project(&mut store, EditTarget::Existing(existing), args)?
        }
        Command::Export { out } => {
            let dir = out.unwrap_or_else(|| config.export_dir.clone());
            let path = store.export_to_dir(&dir)?;
            println!("Wrote {}", path.display());
            println!("Replace the bundled portfolio-data.json with this file and redeploy.");
        }
        Command::Reset { yes } => {
            if store.reset(yes)? {
                println!("Local changes discarded; bundled document reloaded.");
            } else {
                println!("Reset skipped; pass --yes to discard local changes.");
            }
        }
    }

    store.confirm_leave(|| {
        eprintln!("Unsaved changes are kept locally; run `folio export` to write portfolio-data.json.");
        true
    });
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<FolioConfig> {
    let mut config = FolioConfig::load(cli.config.as_deref())?;
    config.apply_process_env();
    if let Some(bundle) = &cli.bundle {
        config.bundle_path = bundle.clone();
    }
    if let Some(storage) = &cli.storage {
        config.storage_path = storage.clone();
    }
    Ok(config)
}

fn start_logging(config: &FolioConfig, verbose: bool) -> Result<()> {
    let Some(log_dir) = &config.log_dir else {
        return Ok(());
    };
    let log_dir = absolute(log_dir)?;
    let level = if verbose { "debug" } else { config.log_level.as_str() };
    init_logging(level, &log_dir.to_string_lossy()).map_err(|err| anyhow!(err))?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        folio_core::core_version()
    );
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()
        .context("resolving working directory")?
        .join(path))
}

fn is_admin_command(command: &Command) -> bool {
    matches!(
        command,
        Command::Add { .. }
            | Command::Edit { .. }
            | Command::Delete { .. }
            | Command::Project(_)
            | Command::Export { .. }
            | Command::Reset { .. }
    )
}

fn parse_section(name: &str) -> Result<Section> {
    Section::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Section::ALL.iter().map(|section| section.slug()).collect();
        anyhow!("unknown section `{name}`; expected one of {}", known.join(", "))
    })
}

fn flat_section(name: &str) -> Result<Section> {
    match parse_section(name)? {
        Section::Projects => unreachable_projects().map(|()| Section::Projects),
        section => Ok(section),
    }
}

fn unreachable_projects() -> Result<()> {
    bail!("projects have their own editor; use `folio project add|edit`")
}

fn print_fields(section: &str) {
    let list = Section::from_name(section).map(fields).unwrap_or_default();
    if list.is_empty() {
        println!("(no editable fields)");
        return;
    }
    for field in list {
        let required = if field.required { "required" } else { "optional" };
        let kind = format!("{:?}", field.kind);
        println!("{:<16} {kind:<9} {required:<8} {}", field.name, field.label);
    }
}

fn print_status(store: &CliStore) {
    let doc = store.document();
    println!("folio {}", folio_core::core_version());
    println!("loaded from: {}", store.origin().as_str());
    println!("projects:      {}", doc.projects.len());
    println!("expertise:     {}", doc.expertise_items.len());
    println!("credentials:   {}", doc.credentials.len());
    println!("testimonials:  {}", doc.testimonials.len());
    println!("blog posts:    {}", doc.blog_posts.len());
}

fn print_kpis(store: &CliStore, filter: CategoryFilter) {
    for card in project_cards(store.document(), filter) {
        println!("{} [{}]", card.project.title, card.project.category);
        for kpi in &card.kpis {
            println!("  {:<28} {}", kpi.label, kpi.value);
        }
    }
}

fn list_records<R: SectionRecord>(store: &CliStore) {
    for record in R::collection(store.document()) {
        let key = resolve_natural_key(record)
            .map(|(_, value)| value.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{key:<28} {}", record.display_label());
    }
}

fn apply_sets<R: FormRecord>(editor: &mut RecordEditor<R>, sets: &[(String, String)]) -> Result<()> {
    for (field, value) in sets {
        editor.set_field(field, value)?;
    }
    Ok(())
}

fn add_record<R: FormRecord>(store: &mut CliStore, sets: &[(String, String)]) -> Result<()> {
    let mut editor = RecordEditor::<R>::new(EditTarget::New);
    apply_sets(&mut editor, sets)?;
    let record = editor.submit(|record| record)?;
    let outcome = SectionService::new(store).save(record)?;
    println!("Added {} at position {}.", R::SECTION.singular(), outcome.index());
    Ok(())
}

fn edit_record<R: FormRecord>(
    store: &mut CliStore,
    key: &str,
    sets: &[(String, String)],
) -> Result<()> {
    let mut service = SectionService::new(store);
    let original = service
        .find::<R>(key)
        .cloned()
        .ok_or_else(|| anyhow!("no {} with key `{key}`", R::SECTION.singular()))?;

    let mut editor = RecordEditor::new(EditTarget::Existing(original.clone()));
    apply_sets(&mut editor, sets)?;
    let record = editor.submit(|record| record)?;
    let outcome = service.update(&original, record)?;
    println!("Updated {} at position {}.", R::SECTION.singular(), outcome.index());
    Ok(())
}

fn delete_record<R: SectionRecord>(store: &mut CliStore, key: &str) -> Result<()> {
    let mut service = SectionService::new(store);
    let target = service
        .find::<R>(key)
        .cloned()
        .ok_or_else(|| anyhow!("no {} with key `{key}`", R::SECTION.singular()))?;
    let removed = service.delete(&target)?;
    println!("Removed {removed} record(s) from {}.", R::SECTION);
    Ok(())
}

fn save_project(store: &mut CliStore, target: EditTarget<Project>, args: ProjectArgs) -> Result<()> {
    let mut editor = ProjectEditor::new(target);
    apply_project_args(&mut editor, args)?;
    let project = editor.submit(store.id_clock(), |project| project)?;
    let id = project.id;
    let outcome = SectionService::new(store).save(project)?;
    println!("Saved project {id} at position {}.", outcome.index());
    Ok(())
}

fn apply_project_args(editor: &mut ProjectEditor, args: ProjectArgs) -> Result<()> {
    let form = editor.form_mut();
    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(category) = args.category {
        form.category = category;
    }
    if let Some(image_url) = args.image_url {
        form.image_url = image_url;
    }
    if let Some(year) = args.year {
        form.year = year;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    if let Some(technologies) = args.technologies {
        form.technologies = technologies;
    }
    if let Some(case_study_url) = args.case_study_url {
        form.case_study_url = case_study_url;
    }
    if let Some(chart_title) = args.chart_title {
        form.chart_title = chart_title;
    }
    if let Some(lat) = args.lat {
        form.lat = lat;
    }
    if let Some(lon) = args.lon {
        form.lon = lon;
    }
    if args.clear_points {
        form.chart_data.clear();
    }

    let mut removals = args.remove_points;
    removals.sort_unstable_by(|a, b| b.cmp(a));
    removals.dedup();
    for index in removals {
        editor.remove_chart_point(index)?;
    }

    for point in args.points {
        let index = editor.add_chart_point();
        editor.update_chart_point(index, ChartPointEdit::Name(point.name))?;
        editor.update_chart_point(index, ChartPointEdit::Value(point.value))?;
        if let Some(unit) = point.unit {
            editor.update_chart_point(index, ChartPointEdit::Unit(unit))?;
        }
    }
    Ok(())
}
