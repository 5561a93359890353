use populace_core::FieldTable;
use populace_generate::{
    GenerationError, MemorySink, PopulationRunner, RecordSpec, RunOptions,
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Measurement {
    created: i64,
    sensor: String,
    owner: String,
    measured_value: i64,
}

fn measurement_table() -> FieldTable<Measurement> {
    FieldTable::new("measurement")
        .field("created", |m: &mut Measurement, v: i64| m.created = v)
        .field("sensor", |m: &mut Measurement, v: String| m.sensor = v)
        .field("owner", |m: &mut Measurement, v: String| m.owner = v)
        .field("measured_value", |m: &mut Measurement, v: i64| {
            m.measured_value = v
        })
}

fn seeded_runner(seed: u64) -> PopulationRunner<Measurement> {
    PopulationRunner::with_options(
        measurement_table(),
        RunOptions {
            seed: Some(seed),
            ..RunOptions::default()
        },
    )
}

fn batman_spec() -> RecordSpec {
    RecordSpec::new("batman")
        .fixed_values("owner", ["batman"])
        .range_values("created", 15000_i64, 15050_i64)
        .count(50)
}

fn crowd_spec() -> RecordSpec {
    RecordSpec::new("crowd")
        .fixed_values("owner", ["superman", "robin"])
        .range_values("created", 14000_i64, 16000_i64)
        .count(1000)
}

#[test]
fn aggregated_output_contains_every_sub_population() {
    let mut runner = seeded_runner(101);
    runner.add_spec(batman_spec()).add_spec(crowd_spec());

    let run = runner.run().expect("run succeeds");
    assert_eq!(run.records.len(), 1050);

    let batmans: Vec<_> = run
        .records
        .iter()
        .filter(|r| r.owner == "batman")
        .collect();
    assert_eq!(batmans.len(), 50);
    for record in batmans {
        assert!(record.created >= 15000);
        assert!(record.created < 15050);
    }
}

#[test]
fn output_preserves_registration_order() {
    let mut runner = seeded_runner(103);
    runner.add_spec(batman_spec()).add_spec(crowd_spec());

    let run = runner.run().expect("run succeeds");
    for record in &run.records[..50] {
        assert_eq!(record.owner, "batman");
    }
    for record in &run.records[50..] {
        assert!(record.owner == "superman" || record.owner == "robin");
    }
}

#[test]
fn report_tracks_per_spec_counts() {
    let mut runner = seeded_runner(107);
    runner.add_spec(batman_spec()).add_spec(crowd_spec());

    let run = runner.run().expect("run succeeds");
    let report = &run.report;
    assert_eq!(report.records_total, 1050);
    assert_eq!(report.specs.len(), 2);
    assert_eq!(report.specs[0].label, "batman");
    assert_eq!(report.specs[0].requested, 50);
    assert_eq!(report.specs[0].generated, 50);
    assert_eq!(report.specs[1].label, "crowd");
    assert_eq!(report.specs[1].generated, 1000);
    assert_eq!(report.seed, 107);
}

#[test]
fn seeded_runs_reproduce_identically() {
    let mut first = seeded_runner(109);
    first.add_spec(batman_spec()).add_spec(crowd_spec());
    let mut second = seeded_runner(109);
    second.add_spec(batman_spec()).add_spec(crowd_spec());

    let a = first.run().expect("first run succeeds");
    let b = second.run().expect("second run succeeds");
    assert_eq!(a.records, b.records);
}

#[test]
fn rerunning_the_same_runner_keeps_constraints() {
    let mut runner = PopulationRunner::new(measurement_table());
    runner.add_spec(batman_spec()).add_spec(crowd_spec());

    let first = runner.run().expect("first run succeeds");
    let second = runner.run().expect("second run succeeds");
    assert_eq!(first.records.len(), second.records.len());
    for run in [&first, &second] {
        for record in run.records.iter().filter(|r| r.owner == "batman") {
            assert!(record.created >= 15000 && record.created < 15050);
        }
    }
}

#[test]
fn run_into_streams_every_batch_to_the_sink() {
    let mut runner = seeded_runner(113);
    runner.add_spec(batman_spec()).add_spec(crowd_spec());

    let mut sink = MemorySink::new();
    let report = runner.run_into(&mut sink).expect("run succeeds");
    assert_eq!(report.records_total, 1050);
    assert_eq!(sink.records()[0].owner, "batman");

    let records = sink.into_records();
    assert_eq!(records.len(), 1050);
}

#[test]
fn value_kind_mismatch_aborts_with_materialization_error() {
    let mut runner = seeded_runner(127);
    runner.add_spec(
        RecordSpec::new("text_into_long")
            .fixed_values("created", ["not-a-number"])
            .count(1),
    );

    let result = runner.run();
    assert!(matches!(result, Err(GenerationError::Materialization(_))));
}

#[test]
fn failed_spec_yields_no_partial_output() {
    let mut runner = seeded_runner(131);
    runner.add_spec(batman_spec());
    runner.add_spec(
        RecordSpec::new("doomed")
            .exclusive_fixed_values("owner", ["solo"])
            .count(2),
    );

    let result = runner.run();
    assert!(result.is_err(), "second spec must abort the whole run");

    let mut sink: MemorySink<Measurement> = MemorySink::new();
    let streamed = runner.run_into(&mut sink);
    assert!(streamed.is_err());
    // Batches delivered before the failure stay with the sink; the run
    // itself reports the failure instead of a short total.
    assert_eq!(sink.records().len(), 50);
}
