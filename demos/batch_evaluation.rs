fn main() {
    pretty_env_logger::init();

    let expressions = vec![
        "2 + 3 * 4",
        "(2 + 3) * 4",
        "8 - 3 - 2",
        "1 / 0",
        "(1 + 2",
        "2 + #3",
    ];

    let results = reckon_rs::evaluate_batch(&expressions);
    for (i, (expression, result)) in expressions.iter().zip(results).enumerate() {
        match result {
            Ok(value) => println!("Result {}: {} = {}", i, expression, value),
            Err(err) => println!("Result {}: {}", i, err.render(expression)),
        }
    }
}
