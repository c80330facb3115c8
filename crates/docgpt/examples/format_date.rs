//! Turn a docstring into a date formatter.
//!
//! Requires `OPENAI_API_KEY`. Run with:
//! `cargo run -p docgpt --example format_date`

use docgpt::{CallArgs, LlmFunction, ReasonedAnswer};

#[tokio::main]
async fn main() -> docgpt::Result<()> {
    let format_date = LlmFunction::<String>::builder("format_date")
        .doc("Format the date as yyyy-mm-dd")
        .param("date")
        .build()?;

    println!("{}\n", format_date.help());

    for input in ["December 9, 1992.", "On May the 4th 1979", "12/31/2008."] {
        let date = format_date.call(CallArgs::new().arg(input)).await?;
        println!("{input:>22} -> {date}");
    }

    let weekday = LlmFunction::<ReasonedAnswer<String>>::builder("weekday_of")
        .doc("Give the day of the week of the date.")
        .param("date")
        .build()?;

    let answer = weekday
        .call(
            CallArgs::new()
                .arg("1992-12-09")
                .gpt_system_prompt("Think step by step."),
        )
        .await?;
    println!("\n{answer}");

    Ok(())
}
