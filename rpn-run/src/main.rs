use std::io;

use futures::channel::oneshot;

use log::{
    debug,
    info,
};

use rustyline::{
    error::ReadlineError,
    Editor,
};

use structopt::StructOpt;

use rpn::{
    number::NumberFormat,
    proto::Session,
};

mod options;

#[derive(Debug)]
enum Error {
    Readline(ReadlineError),
    QuitTxTerminated,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let options = options::Options::from_args();
    debug!("{:?}", options);

    let mut session = Session::with_format(
        NumberFormat::new(options.precision, options.display_precision),
    );

    if !options.tokens.is_empty() {
        println!("{}", session.eval_tokens(&options.tokens));
        return Ok(());
    }

    let (quit_tx, quit_rx) = oneshot::channel();

    tokio::task::spawn_blocking(move || {
        let result = run_prompt(&mut session, &options.history);
        quit_tx.send(result).ok();
    });

    quit_rx.await.map_err(|_| Error::QuitTxTerminated)?
}

fn run_prompt(session: &mut Session, history: &str) -> Result<(), Error> {
    let mut rl = Editor::<()>::new();
    match rl.load_history(history) {
        Ok(()) =>
            (),
        Err(ReadlineError::Io(ref e)) if e.kind() == io::ErrorKind::NotFound => {
            info!("no previous history in {}", history);
        },
        Err(e) =>
            return Err(Error::Readline(e)),
    }

    println!("Enter numbers and operators separated by spaces\nFor example: 1 2 + 3 *\nOr 'quit' to exit...\n");
    loop {
        let readline = rl.readline("> ");
        let line = match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str());
                line
            },
            Err(ReadlineError::Interrupted) => {
                println!("Exit on <CTRL-C>");
                break
            },
            Err(ReadlineError::Eof) => {
                println!("Exit on <CTRL-D>");
                break
            },
            Err(err) => {
                println!("Read error: {}", err);
                break
            }
        };
        match line.trim() {
            "quit" | "exit" => {
                println!("Bye...");
                break;
            },
            _ =>
                (),
        }
        match session.eval_line(&line) {
            Ok(report) =>
                println!("{}", report),
            Err(e) =>
                println!("Error: {}", e),
        }
    }

    rl.save_history(history).map_err(Error::Readline)
}
