use anyhow::Result;
use std::env;
use todo_report::Options;

#[tokio::main]
async fn main() -> Result<()> {
    mlog::trace::initialize();

    let mut args = env::args();
    let executable = args.next().and_then(|argv0| todo_report::executable_name(&argv0));
    let mut options = Options::new(args.next().unwrap_or_else(|| ".".to_owned()));
    if let Some(executable) = executable {
        options = options.exclude_file(executable);
    }

    if let Err(err) = todo_report::run(&options).await {
        mlog::err!(true, "{err:#}");
    }
    Ok(())
}
