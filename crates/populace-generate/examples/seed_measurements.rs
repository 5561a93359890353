use populace_core::FieldTable;
use populace_generate::{MemorySink, PopulationRunner, RecordSpec, RunOptions};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Measurement {
    created: i64,
    sensor: String,
    owner: String,
    measured_value: i64,
    active: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut seed = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = args.next().map(|value| value.parse()).transpose()?,
            _ => return Err("unexpected argument".into()),
        }
    }

    let table: FieldTable<Measurement> = FieldTable::new("measurement")
        .field("created", |m: &mut Measurement, v: i64| m.created = v)
        .field("sensor", |m: &mut Measurement, v: String| m.sensor = v)
        .field("owner", |m: &mut Measurement, v: String| m.owner = v)
        .field("measured_value", |m: &mut Measurement, v: i64| {
            m.measured_value = v
        })
        .field("active", |m: &mut Measurement, v: bool| m.active = v);

    let other_users = RecordSpec::new("other_users")
        .fixed_values("owner", ["superman", "robin", "goblin"])
        .range_values("created", 1000_i64, 2000_i64)
        .range_values("measured_value", 0_i64, 100_i64)
        .fixed_values("sensor", ["hbm", "accelerometer", "hygrometer", "proximity"])
        .count(400_000);

    let batmans_proximity = RecordSpec::new("batmans_proximity")
        .fixed_values("owner", ["batman"])
        .range_values("created", 1500_i64, 1600_i64)
        .range_values("measured_value", 0_i64, 100_i64)
        .fixed_values("sensor", ["proximity"])
        .count(50);

    let other_sensors_for_batman = RecordSpec::new("other_sensors_for_batman")
        .fixed_values("owner", ["batman"])
        .range_values("created", 1000_i64, 1500_i64)
        .range_values("measured_value", 0_i64, 100_i64)
        .fixed_values("sensor", ["hbm", "accelerometer", "hygrometer"])
        .count(99_950);

    let options = RunOptions {
        seed,
        ..RunOptions::default()
    };
    let mut runner = PopulationRunner::with_options(table, options);
    runner.add_spec(other_users);
    runner.add_spec(batmans_proximity);
    runner.add_spec(other_sensors_for_batman);

    let mut sink = MemorySink::new();
    let report = runner.run_into(&mut sink)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    println!("records={}", sink.records().len());
    Ok(())
}
