//! Integration tests for the reliability engine, driven through file sources.

use std::io::Write;

use reliability_engine::{
  Config, Engine, EngineError, ErrorOutput, FileSource, Metric, Query, SourceFormat,
};
use tempfile::NamedTempFile;

const FIXTURE_CSV: &str = "\
Solicitação,Local,Subsistema,Prioridade,Descrição,Solução,Dt Falha,Hr Falha,Dt Enc,Hr Enc,Ordem,Reclamante
1001,Estação Norte,A,Alta,Vazamento,Troca de selo,2024-01-01,08:00,2024-01-01,10:00,5001,Ana
1002,Estação Norte,A,Média,Vazamento,Aperto,2024-01-04,08:00,2024-01-04,10:00,5002,Ana
1003,Estação Norte,A,Alta,Ruído,Lubrificação,2024-01-10,08:00,2024-01-10,10:00,5003,Rui
1004,Estação Sul,B,Baixa,Porta,Ajuste,2024-01-02,09:00,2024-01-02,11:30,5004,Rui
1005,Estação Sul,B,Baixa,Porta,Ajuste,2024-01-05,09:00,2024-01-05,12:30,,Rui
1006,Pátio,C,Alta,Falha elétrica,Reset,2024-01-01,00:00,2024-01-01,06:00,5006,Eva
1007,Pátio,C,Alta,Falha elétrica,Reset,2024-01-02,00:00,2024-01-02,06:00,5007,Eva
1008,Pátio,D,Média,Sensor,Troca,2024-01-03,10:00,2024-01-03,11:00,5008,Eva
x,Estação Norte,A,Alta,Sem data,,31/01/2024,8h,,,n/a,Ana
1010,Pátio,,Alta,Sem subsistema,,2024-01-05,10:00,2024-01-05,11:00,5010,Eva
";

fn write_fixture(contents: &str, suffix: &str) -> NamedTempFile {
  let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
  file.write_all(contents.as_bytes()).unwrap();
  file.flush().unwrap();
  file
}

fn engine_for(file: &NamedTempFile) -> Engine<FileSource> {
  let config = Config {
    source_path: file.path().to_path_buf(),
    ..Config::default()
  };
  Engine::from_config(&config).unwrap()
}

#[test]
fn mttf_orders_descending_and_skips_single_failures() {
  let file = write_fixture(FIXTURE_CSV, ".csv");
  let mttf = engine_for(&file).mttf().unwrap();

  let got: Vec<(&str, Option<f64>)> = mttf
    .iter()
    .map(|r| (r.subsystem.as_str(), r.mttf_days))
    .collect();
  assert_eq!(got, vec![("A", Some(4.5)), ("B", Some(3.0)), ("C", Some(1.0))]);
}

#[test]
fn mttr_orders_ascending() {
  let file = write_fixture(FIXTURE_CSV, ".csv");
  let mttr = engine_for(&file).mttr().unwrap();

  let got: Vec<(&str, f64)> = mttr
    .iter()
    .map(|r| (r.subsystem.as_str(), r.mttr_hours))
    .collect();
  assert_eq!(got, vec![("D", 1.0), ("A", 2.0), ("B", 3.0), ("C", 6.0)]);
}

#[test]
fn availability_is_an_inner_join() {
  let file = write_fixture(FIXTURE_CSV, ".csv");
  let availability = engine_for(&file).availability().unwrap();

  let got: Vec<(&str, Option<f64>)> = availability
    .iter()
    .map(|r| (r.subsystem.as_str(), r.availability_pct))
    .collect();
  // D has a repair but a single failure, so no MTTF and no availability.
  assert_eq!(
    got,
    vec![("A", Some(98.18)), ("B", Some(96.0)), ("C", Some(80.0))]
  );
}

#[test]
fn fleet_availability_is_unweighted_mean() {
  let file = write_fixture(FIXTURE_CSV, ".csv");
  let fleet = engine_for(&file).fleet_availability().unwrap();
  assert_eq!(fleet.availability_mean, Some(91.39));
}

#[test]
fn failure_counts_include_undated_rows() {
  let file = write_fixture(FIXTURE_CSV, ".csv");
  let counts = engine_for(&file).failure_counts().unwrap();

  let got: Vec<(&str, u64)> = counts
    .iter()
    .map(|c| (c.subsystem.as_str(), c.failure_count))
    .collect();
  assert_eq!(got, vec![("A", 4), ("B", 2), ("C", 2), ("D", 1)]);
}

#[test]
fn census_ignores_blank_subsystem() {
  let file = write_fixture(FIXTURE_CSV, ".csv");
  let census = engine_for(&file).subsystem_census().unwrap();
  assert_eq!(census.distinct_subsystem_count, 4);
}

#[test]
fn passthrough_fields_are_typed() {
  let file = write_fixture(FIXTURE_CSV, ".csv");
  let table = engine_for(&file).snapshot().unwrap();

  assert_eq!(table.events.len(), 10);
  let first = &table.events[0];
  assert_eq!(first.request_id, Some(1001.0));
  assert_eq!(first.order_id, Some(5001.0));
  assert_eq!(first.location.as_deref(), Some("Estação Norte"));
  assert_eq!(first.priority.as_deref(), Some("Alta"));
  assert_eq!(first.requester.as_deref(), Some("Ana"));

  let bad = &table.events[8];
  assert!(bad.request_id.is_none());
  assert!(bad.failure_date.is_none());
  assert!(bad.failure_time.is_none());
  assert!(bad.order_id.is_none());
}

#[test]
fn missing_subsystem_column_fails_every_query_with_schema_error() {
  let csv = "dt_falha,hr_falha,dt_enc,hr_enc\n2024-01-01,08:00,2024-01-01,09:00\n";
  let file = write_fixture(csv, ".csv");
  let engine = engine_for(&file);

  for q in Query::ALL {
    match engine.run(q) {
      Err(EngineError::Schema { metric, missing }) => {
        assert_eq!(metric, q.metric());
        assert!(missing.contains(&"subsistema".to_string()));
      }
      other => panic!("{}: expected schema error, got {:?}", q.as_str(), other),
    }
  }
}

#[test]
fn mttr_needs_repair_columns_but_mttf_does_not() {
  let csv = "subsistema,dt_falha\nA,2024-01-01\nA,2024-01-02\n";
  let file = write_fixture(csv, ".csv");
  let engine = engine_for(&file);

  assert_eq!(engine.mttf().unwrap()[0].mttf_days, Some(1.0));
  match engine.mttr().unwrap_err() {
    EngineError::Schema { metric, missing } => {
      assert_eq!(metric, Metric::Mttr);
      assert_eq!(missing, vec!["hr_falha", "dt_enc", "hr_enc"]);
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn header_only_source_gives_empty_results() {
  let file = write_fixture("subsistema,dt_falha,hr_falha,dt_enc,hr_enc\n", ".csv");
  let engine = engine_for(&file);

  assert!(engine.mttf().unwrap().is_empty());
  assert!(engine.mttr().unwrap().is_empty());
  assert!(engine.availability().unwrap().is_empty());
  assert!(engine.failure_counts().unwrap().is_empty());
  assert_eq!(engine.subsystem_census().unwrap().distinct_subsystem_count, 0);
  assert_eq!(engine.fleet_availability().unwrap().availability_mean, None);
}

#[test]
fn missing_file_is_reported_not_retried() {
  let config = Config {
    source_path: "/nonexistent/dir/maintenance.csv".into(),
    ..Config::default()
  };
  let engine = Engine::from_config(&config).unwrap();
  let err = engine.mttf().unwrap_err();
  assert!(matches!(err, EngineError::MissingSource { .. }));

  let payload = serde_json::to_value(ErrorOutput::from(&err)).unwrap();
  assert_eq!(payload["error"], true);
  assert_eq!(payload["kind"], "missing_source");
}

#[test]
fn deterministic_output_across_runs() {
  let file = write_fixture(FIXTURE_CSV, ".csv");

  for q in Query::ALL {
    let first = serde_json::to_string(&engine_for(&file).run(q).unwrap()).unwrap();
    let second = serde_json::to_string(&engine_for(&file).run(q).unwrap()).unwrap();
    assert_eq!(first, second, "{} is not deterministic", q.as_str());
  }
}

#[test]
fn edits_between_queries_are_picked_up() {
  let file = write_fixture("subsistema\nA\n", ".csv");
  let engine = engine_for(&file);
  assert_eq!(engine.subsystem_census().unwrap().distinct_subsystem_count, 1);

  std::fs::write(file.path(), "subsistema\nA\nB\nC\n").unwrap();
  assert_eq!(engine.subsystem_census().unwrap().distinct_subsystem_count, 3);
}

#[test]
fn json_lines_source_matches_csv() {
  let jsonl = r#"{"Subsistema":"C","Dt Falha":"2024-01-01","Hr Falha":"00:00","Dt Enc":"2024-01-01","Hr Enc":"06:00","Ordem":1}
{"Subsistema":"C","Dt Falha":"2024-01-02","Hr Falha":"00:00","Dt Enc":"2024-01-02","Hr Enc":"06:00","Ordem":null}
"#;
  let file = write_fixture(jsonl, ".jsonl");
  let engine = engine_for(&file);
  assert!(matches!(
    engine.source().path().extension().and_then(|e| e.to_str()),
    Some("jsonl")
  ));

  assert_eq!(engine.availability().unwrap()[0].availability_pct, Some(80.0));
  assert_eq!(engine.snapshot().unwrap().events[0].order_id, Some(1.0));
}

#[test]
fn explicit_format_overrides_extension() {
  let file = write_fixture("subsistema\nA\nB\n", ".txt");
  let engine = Engine::new(FileSource::new(file.path(), SourceFormat::Csv));
  assert_eq!(engine.subsystem_census().unwrap().distinct_subsystem_count, 2);
}

#[test]
fn query_output_json_shape() {
  let file = write_fixture(FIXTURE_CSV, ".csv");
  let engine = engine_for(&file);

  let mttf = serde_json::to_value(engine.run(Query::Mttf).unwrap()).unwrap();
  assert_eq!(mttf[0]["subsystem"], "A");
  assert_eq!(mttf[0]["mttf_days"], 4.5);

  let census = serde_json::to_value(engine.run(Query::SubsystemCensus).unwrap()).unwrap();
  assert_eq!(census["distinct_subsystem_count"], 4);

  let fleet = serde_json::to_value(engine.run(Query::FleetAvailability).unwrap()).unwrap();
  assert_eq!(fleet["availability_mean"], 91.39);
}
