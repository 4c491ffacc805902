use ts_batch::schema::{PointDef, QueryFile};
use ts_batch::run_batch;
use ts_fluids::{
    ErrorKind, OverallBundle, RawEngineState, RecordedEngine, Session, StateError, validate,
};

fn gas(t: f64, p: f64) -> RawEngineState {
    RawEngineState::single_phase(OverallBundle {
        temperature: t,
        pressure: p,
        density: p / (296.8 * t),
        internal_energy: 743.0 * t,
        enthalpy: 1041.0 * t,
        entropy: 6.7e3,
        cp: Some(1041.0),
        cv: Some(743.0),
        sound_speed: Some(337.0),
        quality: -1.0,
        composition: vec![1.0],
        liquid_density: Some(p / (296.8 * t)),
        vapor_density: Some(p / (296.8 * t)),
        conductivity: Some(0.024),
        viscosity: Some(1.7e-5),
        surface_tension: None,
    })
}

fn engine() -> RecordedEngine {
    RecordedEngine::new("recorded")
        .with_fluid("nitrogen", &["N2"])
        .record(
            "nitrogen",
            validate([("T", 273.15), ("P", 101_325.0)]).unwrap(),
            Ok(gas(273.15, 101_325.0)),
        )
}

#[test]
fn runs_every_point_and_keeps_failures() {
    let file = QueryFile {
        version: 1,
        fluid: "N2".to_string(),
        points: vec![
            PointDef::new(Some("ice"), [("T", "0 C"), ("P", "1 atm")]),
            PointDef::new(Some("hot"), [("T", 5000.0), ("P", 1e5)]),
            PointDef::new(None, [("H", 1e5), ("Q", 0.5)]),
        ],
    };
    let mut session = Session::new(engine());

    let outcomes = run_batch(&mut session, &file).unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].label, "ice");
    let state = outcomes[0].result.as_ref().unwrap();
    assert_eq!(state.get("P"), Some(101_325.0));

    assert_eq!(
        outcomes[1].result.as_ref().unwrap_err().kind(),
        ErrorKind::OutOfRange
    );
    assert_eq!(outcomes[2].label, "#3");
    assert_eq!(
        outcomes[2].result.as_ref().unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    // The invalid pair is rejected before the engine is asked.
    assert_eq!(session.engine().calls(), 2);
    assert_eq!(session.active_fluid(), Some("N2"));
}

#[test]
fn unknown_fluid_aborts_the_batch() {
    let file = QueryFile {
        version: 1,
        fluid: "urine".to_string(),
        points: vec![PointDef::new(None, [("T", 300.0), ("P", 1e5)])],
    };
    let mut session = Session::new(engine());

    let err = run_batch(&mut session, &file).unwrap_err();
    assert_eq!(
        err,
        StateError::UnknownFluid {
            name: "urine".into()
        }
    );
}

#[test]
fn outcomes_serialize_with_state_or_error() {
    let file = QueryFile {
        version: 1,
        fluid: "nitrogen".to_string(),
        points: vec![
            PointDef::new(Some("ok"), [("T", 273.15), ("P", 101_325.0)]),
            PointDef::new(Some("bad"), [("T", 300.0), ("P", 1e5)]),
        ],
    };
    let mut session = Session::new(engine());
    let outcomes = run_batch(&mut session, &file).unwrap();

    let json = serde_json::to_value(&outcomes).unwrap();
    assert_eq!(json[0]["label"], "ok");
    assert_eq!(json[0]["state"]["T"], 273.15);
    assert_eq!(json[1]["error"]["kind"], "OutOfRange");
    assert!(json[1].get("state").is_none());
}
