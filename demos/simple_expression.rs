fn main() {
    pretty_env_logger::init();

    let expressions = ["(2 + 3) * 4 - 1.5", "8 - 3 - 2", "1 +\n(2 * #)"];

    for expression in expressions {
        match reckon_rs::evaluate(expression) {
            Ok(result) => println!("{} = {}", expression, result),
            Err(err) => println!("Error:\n{}", err.render(expression)),
        }
    }
}
