//! Command Protocol Session Example
//!
//! Feeds a scripted byte stream through the line buffer and the command
//! parser, the way a host serial port would, and prints each
//! request/reply pair, including the error replies for malformed input.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_command_session
//! ```

use mainsguard_core::serial::{LineBuffer, ScriptedLink};
use mainsguard_core::{command, MeterConfig};

fn main() {
    let mut config = MeterConfig::default();

    // One byte stream, several lines, a few of them deliberately broken.
    let mut link = ScriptedLink::<256>::new();
    link.feed(b">GET_CONFIG\r\n");
    link.feed(b">SET_V,230.5\n");
    link.feed(b">SET_PF,0.95\n");
    link.feed(b">SET_SENS,0.185\n");
    link.feed(b">GET_CONFIG\n");
    link.feed(b">SET_V,not-a-number\n");
    link.feed(b">BOGUS,1\n");
    link.feed(b">SET_PF\n");
    link.feed(b"no marker\n");

    let mut lines = LineBuffer::<64>::new();
    while let Some(line) = lines.poll_line(&mut link) {
        let reply = command::execute(&line, &mut config);
        println!("{:<22} -> {}", line.as_str(), reply.as_str());
    }

    println!();
    println!(
        "final config: {} V nominal, PF {}, sensitivity {} V/A ({} V/A effective)",
        config.nominal_voltage(),
        config.power_factor(),
        config.sensor_sensitivity(),
        config.effective_sensitivity(),
    );
}
