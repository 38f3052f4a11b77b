use reckon_rs::ast::Evaluator;

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::new(32);

    let expression = "-(1.5 + 2.5) * 3 / (4 - 2)";
    let ast = evaluator
        .parse_expression(expression)
        .expect("Failed to parse");
    println!("Tree: {}", ast);

    match evaluator.evaluate(&ast) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
