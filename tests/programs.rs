use monkey_interpreter::environment::Environment;
use monkey_interpreter::error::ParseError;
use monkey_interpreter::object::Object;
use monkey_interpreter::{parse, run, run_in};

fn run_ok(input: &str) -> Object {
    run(input).unwrap_or_else(|err| panic!("parser errors for {:?}:\n{}", input, err))
}

#[test]
fn recursive_fibonacci() {
    let input = "
        let fib = fn(n) {
            if (n < 2) { return n; }
            fib(n - 1) + fib(n - 2)
        };
        fib(15);";
    assert_eq!(run_ok(input), Object::Integer { value: 610 });
}

#[test]
fn higher_order_functions() {
    let input = r#"
        let map = fn(arr, f) {
            let iter = fn(arr, accumulated) {
                if (len(arr) == 0) {
                    accumulated
                } else {
                    iter(rest(arr), push(accumulated, f(first(arr))));
                }
            };
            iter(arr, []);
        };
        let reduce = fn(arr, initial, f) {
            let iter = fn(arr, result) {
                if (len(arr) == 0) {
                    result
                } else {
                    iter(rest(arr), f(result, first(arr)));
                }
            };
            iter(arr, initial);
        };
        let doubled = map([1, 2, 3, 4], fn(x) { x * 2 });
        reduce(doubled, 0, fn(acc, x) { acc + x });
    "#;
    assert_eq!(run_ok(input), Object::Integer { value: 20 });
}

#[test]
fn closures_capture_outer_parameter() {
    let input = "
        let newGreeter = fn(greeting) { fn(name) { greeting + \" \" + name } };
        let hello = newGreeter(\"Hello\");
        let hi = newGreeter(\"Hi\");
        [hello(\"Thorsten\"), hi(\"Monkey\")]";
    assert_eq!(run_ok(input).to_string(), "[Hello Thorsten, Hi Monkey]");
}

#[test]
fn closures_share_their_defining_scope() {
    let input = "
        let counter = fn() {
            let get = fn() { count };
            let count = 1;
            let count = count + 1;
            get()
        };
        counter()";
    assert_eq!(run_ok(input), Object::Integer { value: 2 });
}

#[test]
fn hash_of_functions() {
    let input = r#"
        let ops = {"add": fn(a, b) { a + b }, "sub": fn(a, b) { a - b }};
        ops["add"](10, ops["sub"](5, 3))"#;
    assert_eq!(run_ok(input), Object::Integer { value: 12 });
}

#[test]
fn runtime_error_is_the_final_value() {
    let result = run_ok("let x = 1; x + true; 99");
    assert_eq!(result.to_string(), "ERROR: type mismatch: INTEGER + BOOLEAN");
    assert!(result.is_error());
}

#[test]
fn syntax_errors_prevent_evaluation() {
    let err = run("puts(1); let = ;").unwrap_err();
    assert_eq!(
        err.0[0],
        ParseError::UnexpectedToken {
            expected: "IDENT",
            got: "=",
        }
    );
}

#[test]
fn environment_survives_between_runs() {
    let env = Environment::new_shared();
    run_in("let a = 40;", &env).unwrap();
    run_in("let add = fn(x) { a + x };", &env).unwrap();
    assert_eq!(run_in("add(2)", &env).unwrap(), Object::Integer { value: 42 });
}

#[test]
fn rendering_round_trips() {
    let input = "let max = fn(a, b) { if (a > b) { return a; } else { return b; } }; max(3, -4 * 2);";
    let program = parse(input).unwrap();
    let rendered = program.to_string();
    assert_eq!(
        rendered,
        "let max = fn(a, b) { if ((a > b)) { return a; } else { return b; }; }; max(3, ((-4) * 2));"
    );
    assert_eq!(parse(&rendered).unwrap(), program);
    assert_eq!(run_ok(&rendered), run_ok(input));
}
