use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use vibesnack_core::UserContext;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args().nth(1);
    let reader: Box<dyn BufRead> = match path {
        Some(p) => Box::new(BufReader::new(File::open(p)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let ctx: UserContext = serde_json::from_str(&line)?;
        match ctx.validate() {
            Ok(()) => println!("{}\t{}\t{}", ctx.time_of_day(), ctx.diet, ctx.activity),
            Err(e) => println!("invalid\t{e}"),
        }
    }

    Ok(())
}
