//! Basic SMS parsing example.
//!
//! Demonstrates how to use `parse_sms_with_trace()` to turn a raw inbound
//! message into a structured command and inspect how it was parsed.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p penzi-sms-parser --example parse_sms
//! ```

use penzi_sms_parser::parse_sms_with_trace;

fn main() {
    // A registration message the way a gateway would deliver it
    let message = "reg name:Mary Wanjiku, age:23, gender:Female,\ncounty:Nairobi, town:Westlands";

    let run = parse_sms_with_trace(message, "0712345678");

    println!("Kind: {}", run.command.kind);
    println!("Sender: {}", run.command.sender_id);
    println!("Normalized: {:?}", run.trace.normalized_text);

    println!("\nParameters ({}):", run.command.parameters.len());
    for (name, value) in &run.command.parameters {
        println!("  {name} = {value}");
    }

    println!("\nGrammars tried ({}):", run.trace.attempts.len());
    for attempt in &run.trace.attempts {
        let mark = if attempt.matched { "matched" } else { "no" };
        println!("  {}  {mark}", attempt.kind);
    }

    if !run.trace.dropped_fields.is_empty() {
        println!("\nDropped fields:");
        for dropped in &run.trace.dropped_fields {
            println!("  {} = {:?} ({})", dropped.field, dropped.value, dropped.reason);
        }
    }
}
