//! `tripplan` - CLI for tripplanner
//!
//! Every invocation loads the planner from storage, applies one command and
//! prints the section it touched.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;

use tripplanner::cli::{
    BudgetCommand, CardCommand, ChecklistCommand, Cli, Command, ConfigCommand, ItineraryCommand,
    TripCommand, TripSetArgs,
};
use tripplanner::{
    init_logging, CardKind, Config, KeyValueStore, MemoryStore, Section, SqliteStore, Surface,
    TextPage, TripField, TripPlanner,
};

type Planner = TripPlanner<Box<dyn KeyValueStore>, TextPage>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    // Configuration commands never touch the store
    let command = match cli.command {
        Command::Config(config_cmd) => return handle_config(&config, config_cmd),
        command => command,
    };

    let mut backend = open_backend(&config, cli.ephemeral)?;
    if let Command::Reset(reset) = &command {
        if reset.yes {
            let removed = backend.clear().context("clearing the store")?;
            println!("Removed {removed} stored records.");
        } else {
            println!("This will delete the trip, budget and every card.");
            println!("Use --yes to confirm.");
        }
        return Ok(());
    }

    let mut planner = TripPlanner::bootstrap(backend, TextPage::new(), &config);
    let result = run(&mut planner, &config, command);

    for alert in planner.page_mut().take_alerts() {
        println!("{alert}");
    }
    result
}

fn open_backend(config: &Config, ephemeral: bool) -> anyhow::Result<Box<dyn KeyValueStore>> {
    let quota = config.storage.quota_bytes;
    if ephemeral {
        return Ok(Box::new(MemoryStore::with_quota(quota)));
    }
    let path = config.database_path();
    let store = SqliteStore::open(&path, quota)
        .with_context(|| format!("opening store at {}", path.display()))?;
    Ok(Box::new(store))
}

fn run(planner: &mut Planner, config: &Config, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Trip(TripCommand::Show) => print_trip(planner),
        Command::Trip(TripCommand::Set(args)) => {
            apply_trip_fields(planner, args);
            print_trip(planner);
        }
        Command::Budget(BudgetCommand::Show) => print_budget(planner),
        Command::Budget(BudgetCommand::Set { label, amount }) => {
            planner.input_budget(&label, amount)?;
            print_budget(planner);
        }
        Command::Card(card_cmd) => handle_card(planner, card_cmd)?,
        Command::Summary(summary_cmd) => {
            if summary_cmd.json {
                println!("{}", serde_json::to_string_pretty(planner.summary())?);
            } else {
                print_section(planner, Section::Overview);
            }
        }
        Command::Itinerary(itinerary_cmd) => handle_itinerary(planner, itinerary_cmd)?,
        Command::Checklist(checklist_cmd) => handle_checklist(planner, checklist_cmd)?,
        Command::Status(status_cmd) => handle_status(planner, config, status_cmd.json)?,
        Command::Config(_) | Command::Reset(_) => {}
    }
    Ok(())
}

fn apply_trip_fields(planner: &mut Planner, args: TripSetArgs) {
    let changes = [
        (TripField::Destination, args.destination),
        (TripField::StartDate, args.start),
        (TripField::EndDate, args.end),
        (TripField::Travelers, args.travelers),
    ];
    for (field, value) in changes {
        if let Some(value) = value {
            planner.input_trip_field(field, value);
        }
    }
}

fn handle_card(planner: &mut Planner, cmd: CardCommand) -> anyhow::Result<()> {
    match cmd {
        CardCommand::Add { kind, fields } => {
            let kind = CardKind::from(kind);
            let Some(id) = planner.add_card(kind) else {
                bail!("this page has no {kind} section");
            };
            for (field, value) in fields {
                planner.input_card_field(kind, id, &field, value)?;
            }
            print_section(planner, Section::for_kind(kind));
        }
        CardCommand::Remove { kind, position } => {
            let kind = CardKind::from(kind);
            let id = planner.card_id_at(kind, position)?;
            planner.remove_card(kind, id)?;
            print_section(planner, Section::for_kind(kind));
        }
        CardCommand::Edit {
            kind,
            position,
            field,
            value,
        } => {
            let kind = CardKind::from(kind);
            let id = planner.card_id_at(kind, position)?;
            planner.input_card_field(kind, id, &field, value)?;
            print_section(planner, Section::for_kind(kind));
        }
        CardCommand::List { kind, json } => {
            let kind = CardKind::from(kind);
            if json {
                print_cards_json(planner, kind)?;
            } else {
                print_section(planner, Section::for_kind(kind));
            }
        }
    }
    Ok(())
}

fn handle_itinerary(planner: &mut Planner, cmd: ItineraryCommand) -> anyhow::Result<()> {
    if planner.submit_trip().is_err() {
        bail!("no itinerary was generated");
    }
    for _ in 0..cmd.extra_days {
        planner.add_day();
    }
    for (day, text) in cmd.activity {
        let index = planner
            .add_activity(day)?
            .context("this page has no itinerary section")?;
        planner.set_activity(day, index, text)?;
    }
    print_section(planner, Section::Itinerary);
    Ok(())
}

fn handle_checklist(planner: &mut Planner, cmd: ChecklistCommand) -> anyhow::Result<()> {
    if !planner.page().has_section(Section::Checklist) {
        bail!("this page has no checklist section");
    }
    for name in &cmd.item {
        planner.add_checklist_item(name);
    }
    for id in cmd.check {
        planner
            .toggle_checklist_item(id)
            .with_context(|| format!("no checklist item {id}"))?;
    }
    for id in cmd.remove {
        if !planner.remove_checklist_item(id) {
            bail!("no checklist item {id}");
        }
    }
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(planner.checklist())?);
    } else {
        print_section(planner, Section::Checklist);
    }
    Ok(())
}

fn handle_status(planner: &Planner, config: &Config, json: bool) -> anyhow::Result<()> {
    let backend = planner.store().backend();
    let stats = backend.stats()?;
    let keys = backend.keys()?;
    if json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "stats": stats,
            "keys": keys,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("tripplan status");
        println!("---------------");
        println!("Database:      {}", config.database_path().display());
        println!("Records:       {}", stats.entries);
        if stats.quota_bytes == 0 {
            println!("Used:          {} bytes", stats.used_bytes);
        } else {
            println!("Used:          {} of {} bytes", stats.used_bytes, stats.quota_bytes);
        }
        println!("File size:     {} bytes", stats.db_size_bytes);
        for key in keys {
            println!("  {key}");
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:   {}", config.database_path().display());
                println!("  Quota (bytes):   {}", config.storage.quota_bytes);
                println!();
                println!("[Keys]");
                println!("  Trip:            {}", config.keys.trip);
                println!("  Flights:         {}", config.keys.flights);
                println!("  Hotels:          {}", config.keys.hotels);
                println!("  Bookings:        {}", config.keys.bookings);
                println!();
                println!("[Budget]");
                println!("  Currency:        {}", config.budget.currency_symbol);
                println!("  Items:           {}", config.budget.items.join(" "));
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn print_section(planner: &Planner, section: Section) {
    if let Some(text) = planner.page().region(section) {
        print!("{text}");
    }
}

fn print_trip(planner: &Planner) {
    let rows = [
        ("Destination:", TripField::Destination),
        ("Start date:", TripField::StartDate),
        ("End date:", TripField::EndDate),
        ("Travelers:", TripField::Travelers),
    ];
    for (label, field) in rows {
        println!("{label:<12} {}", planner.trip().get(field));
    }
}

fn print_budget(planner: &Planner) {
    for line in &planner.trip().budget {
        println!("{:<20} {}", line.label, line.amount);
    }
    print_section(planner, Section::Budget);
}

fn print_cards_json(planner: &Planner, kind: CardKind) -> anyhow::Result<()> {
    let cards: Vec<serde_json::Map<String, serde_json::Value>> = planner
        .collection(kind)
        .cards()
        .iter()
        .map(|card| {
            card.spec()
                .fields
                .iter()
                .zip(card.values())
                .map(|(field, value)| (field.name.to_string(), value.clone().into()))
                .collect()
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&cards)?);
    Ok(())
}
