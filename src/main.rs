use marquee::error::RunnerError;
use marquee::Runner;

fn main() -> Result<(), RunnerError> {
    env_logger::init();

    Runner::new()
        .with_title("marquee: particle field")
        .with_size(1280, 720)
        .run()
}
