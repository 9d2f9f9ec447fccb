mod hybrid;
mod nfa;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn suite() -> Result<regex_test::RegexTests> {
    let mut tests = regex_test::RegexTests::new();
    macro_rules! load {
        ($name:expr) => {{
            const DATA: &[u8] =
                include_bytes!(concat!("data/", $name, ".toml"));
            tests.load_slice($name, DATA)?;
        }};
    }

    load!("basic");
    load!("errors");
    load!("repetition");
    load!("search");

    Ok(tests)
}
