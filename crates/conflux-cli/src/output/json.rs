use conflux_core::error::ScheduleError;
use conflux_core::schedule::output::ScheduleOutput;

pub fn format(payload: &ScheduleOutput) -> Result<String, ScheduleError> {
    Ok(serde_json::to_string_pretty(payload)?)
}

pub fn print(payload: &ScheduleOutput) -> Result<(), ScheduleError> {
    println!("{}", format(payload)?);
    Ok(())
}
