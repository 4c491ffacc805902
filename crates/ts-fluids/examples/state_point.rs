//! Print nitrogen and isobutane state points from the CoolProp engine.

use ts_fluids::{CoolPropEngine, Session};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(CoolPropEngine::new());

    session.select_fluid("nitrogen")?;
    let gas = session.state_point([("T", 273.15), ("P", 101.3e3)])?;
    println!("nitrogen at 0 C, 1 atm (two-phase: {})", gas.is_two_phase());
    for key in gas.keys() {
        if let Some(value) = gas.get(key) {
            println!("  {key:>5} = {value:.6e}");
        }
    }

    session.select_fluid("isobutan")?;
    let dome = session.state_point([("T", 220.0), ("Q", 0.5)])?;
    println!("isobutane at 220 K, Q = 0.5 (two-phase: {})", dome.is_two_phase());
    println!("{}", serde_json::to_string_pretty(&dome)?);

    Ok(())
}
