use std::path::PathBuf;
use std::process::ExitCode;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use train_schedule::config::{ConfigError, EngineConfig};
use train_schedule::display::{TimetableDto, TripRowDto};
use train_schedule::domain::{
    InvalidRunningDays, InvalidStationCode, InvalidTrainNumber, RunningDays, ServiceRecord,
    StationCode, TrainNumber,
};
use train_schedule::overview::NetworkOverview;
use train_schedule::query::{
    ClassFilter, DayFilter, Filters, InvalidTripOrder, QueryError, TripOrder, find_service,
    match_all, match_query, match_route, match_station, sort_trips,
};
use train_schedule::source::{LoadError, load_services};
use train_schedule::stations::StationIndex;
use train_schedule::timetable::build_timetable;

/// Running days to filter on, e.g. `Mon,Tue` or `daily`.
const DAYS_VAR: &str = "SCHEDULE_DAYS";
/// Classes to filter on, e.g. `SL,3A`.
const CLASSES_VAR: &str = "SCHEDULE_CLASSES";
/// Result order: `departure`, `duration` or `number`.
const ORDER_VAR: &str = "SCHEDULE_ORDER";

const USAGE: &str = "usage: train-schedule <records.json> <command> [args]

commands:
  timetable <number>   full timetable of one service
  route <from> <to>    services from one station to another
  station <code>       services calling at a station
  search <text>        services whose number or name contains text
  all                  every service
  stations [text]      known stations, optionally filtered
  overview [unreserved]
                       network counts, optionally unreserved services only

filters (environment):
  SCHEDULE_DAYS        Mon,Tue,... or daily
  SCHEDULE_DAY_MATCH   any or all
  SCHEDULE_CLASSES     SL,3A,...
  SCHEDULE_ORDER       departure, duration or number";

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("{0}")]
    Usage(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("SCHEDULE_DAYS: {0}")]
    Days(#[from] InvalidRunningDays),

    #[error("SCHEDULE_ORDER: {0}")]
    Order(#[from] InvalidTripOrder),

    #[error(transparent)]
    Station(#[from] InvalidStationCode),

    #[error(transparent)]
    TrainNumber(#[from] InvalidTrainNumber),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("no service numbered {0}")]
    UnknownService(TrainNumber),

    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

enum Command {
    Timetable(TrainNumber),
    Route(StationCode, StationCode),
    Station(StationCode),
    Search(String),
    All,
    Stations(Option<String>),
    Overview { unreserved: bool },
}

impl Command {
    fn parse(args: &[String]) -> Result<Self, AppError> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let command = match args.as_slice() {
            ["timetable", number] => Command::Timetable(TrainNumber::parse(number)?),
            ["route", from, to] => Command::Route(StationCode::parse(from)?, StationCode::parse(to)?),
            ["station", code] => Command::Station(StationCode::parse(code)?),
            ["search", text @ ..] if !text.is_empty() => Command::Search(text.join(" ")),
            ["all"] => Command::All,
            ["stations"] => Command::Stations(None),
            ["stations", text @ ..] => Command::Stations(Some(text.join(" "))),
            ["overview"] => Command::Overview { unreserved: false },
            ["overview", "unreserved"] => Command::Overview { unreserved: true },
            _ => return Err(AppError::Usage(USAGE)),
        };
        Ok(command)
    }
}

fn init_logger() {
    let default_level = "info";
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            eprintln!(
                "invalid {}, falling back to level '{default_level}' - {err}",
                EnvFilter::DEFAULT_ENV
            );
        }
        EnvFilter::new(default_level)
    });

    // Stdout carries the JSON output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

/// Build the day and class filters from the environment.
fn filters_from_env(config: &EngineConfig) -> Result<Filters, AppError> {
    let days = match std::env::var(DAYS_VAR) {
        Ok(value) if value.trim().eq_ignore_ascii_case("daily") => DayFilter::Daily,
        Ok(value) => DayFilter::days(RunningDays::parse_day_list(&value)?, config.day_match),
        Err(_) => DayFilter::Unrestricted,
    };
    let classes = std::env::var(CLASSES_VAR)
        .map(|value| ClassFilter::parse(&value))
        .unwrap_or_default();

    Ok(Filters::new(days, classes))
}

fn order_from_env() -> Result<TripOrder, AppError> {
    match std::env::var(ORDER_VAR) {
        Ok(value) => Ok(value.parse()?),
        Err(_) => Ok(TripOrder::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn execute(
    command: Command,
    services: &[ServiceRecord],
    config: &EngineConfig,
) -> Result<(), AppError> {
    let filters = filters_from_env(config)?;
    let order = order_from_env()?;

    let trips = match command {
        Command::Timetable(number) => {
            let service = find_service(services, &number)
                .ok_or_else(|| AppError::UnknownService(number.clone()))?;
            return print_json(&TimetableDto::from_timetable(&build_timetable(service)));
        }
        Command::Stations(text) => {
            let index = StationIndex::from_services(services);
            let labels: Vec<String> = match text {
                Some(text) => index
                    .find(&text)
                    .into_iter()
                    .filter_map(|code| index.label(code))
                    .collect(),
                None => index.labels(),
            };
            return print_json(&labels);
        }
        Command::Overview { unreserved } => {
            let overview = if unreserved {
                NetworkOverview::unreserved(services)
            } else {
                NetworkOverview::from_services(services)
            };
            return print_json(&overview);
        }
        Command::Route(origin, destination) => {
            match_route(services, &origin, &destination, &filters)?
        }
        Command::Station(station) => match_station(services, &station, &filters),
        Command::Search(text) => match_query(services, &text, &filters)?,
        Command::All => match_all(services, &filters),
    };

    info!(trips = trips.len(), order = %order, "query answered");
    print_json(&TripRowDto::from_trips(&sort_trips(trips, order)))
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((path, rest)) = args.split_first() else {
        return Err(AppError::Usage(USAGE));
    };
    let command = Command::parse(rest)?;

    let config = EngineConfig::from_env()?;
    let path = PathBuf::from(path);
    let services = load_services(&path, &config)?;
    info!(path = %path.display(), services = services.len(), "loaded services");

    execute(command, &services, &config)
}

fn main() -> ExitCode {
    init_logger();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, AppError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        Command::parse(&args)
    }

    #[test]
    fn parse_overview() {
        assert!(matches!(
            parse(&["overview"]),
            Ok(Command::Overview { unreserved: false })
        ));
        assert!(matches!(
            parse(&["overview", "unreserved"]),
            Ok(Command::Overview { unreserved: true })
        ));
        assert!(matches!(
            parse(&["overview", "reserved"]),
            Err(AppError::Usage(_))
        ));
    }

    #[test]
    fn parse_queries() {
        assert!(matches!(
            parse(&["route", "ndls", "HWH"]),
            Ok(Command::Route(from, to)) if from.as_str() == "NDLS" && to.as_str() == "HWH"
        ));
        assert!(matches!(
            parse(&["timetable", "12,302"]),
            Ok(Command::Timetable(number)) if number.as_str() == "12302"
        ));
        assert!(matches!(
            parse(&["search", "howrah", "rajdhani"]),
            Ok(Command::Search(text)) if text == "howrah rajdhani"
        ));
        assert!(matches!(parse(&["stations"]), Ok(Command::Stations(None))));
        assert!(matches!(parse(&["all"]), Ok(Command::All)));
    }

    #[test]
    fn parse_rejects_bad_arguments() {
        assert!(matches!(parse(&[]), Err(AppError::Usage(_))));
        assert!(matches!(parse(&["search"]), Err(AppError::Usage(_))));
        assert!(matches!(parse(&["route", "NDLS"]), Err(AppError::Usage(_))));
        assert!(matches!(
            parse(&["timetable", "12A01"]),
            Err(AppError::TrainNumber(_))
        ));
    }
}
