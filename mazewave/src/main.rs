//! mazewave: solve a maze file given with `-f`.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    if std::env::var("MAZEWAVE_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("MAZEWAVE_LOG")
            .write_style("MAZEWAVE_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    let code = mazewave_lib::run(std::env::args_os(), &mut io::stdout(), &mut io::stderr());
    ExitCode::from(code)
}
