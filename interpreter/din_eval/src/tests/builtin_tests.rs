//! Built-in library tests, grouped like the registry.

use super::{run, run_err, run_lines};

// === Conversion / inspection ===

#[test]
fn int_parses_strings_or_yields_null() {
    assert_eq!(
        run_lines(
            "fun main():
                print(int(\"42\"))
                print(int(\"nope\"))
                print(int(7))
            end"
        ),
        vec!["42", "null", "7"]
    );
}

#[test]
fn float_rounds_to_digits() {
    assert_eq!(
        run_lines(
            "fun main():
                print(float(3.14159, 2))
                print(float(\"2.718\", 1))
                print(float(5, 0))
            end"
        ),
        vec!["3.14", "2.7", "5"]
    );
}

#[test]
fn float_rejects_negative_digits() {
    let err = run_err("fun main(): float(1.0, -1) end");
    assert!(err.contains("float() digit must not be negative"), "{err}");
}

#[test]
fn str_renders_canonical_forms() {
    assert_eq!(
        run_lines(
            "fun main():
                print(str(null))
                print(str(true))
                print(str(3.5))
                print(str([1, \"a\"]))
                print(str({k: 1}))
            end"
        ),
        vec!["null", "true", "3.5", "[1, \"a\"]", "{\"k\": 1}"]
    );
}

#[test]
fn str_of_functions_shows_their_names() {
    assert_eq!(
        run_lines(
            "fun greet(): return 1 end
            fun main():
                print(str(greet))
                print(str(len))
                print(str(fun(): return 1 end))
            end"
        ),
        vec!["<fun greet>", "<builtin len>", "<fun>"]
    );
}

#[test]
fn bool_and_typeof() {
    assert_eq!(
        run_lines(
            "fun main():
                print(bool(0))
                print(bool(\"x\"))
                print(typeof(null))
                print(typeof(1))
                print(typeof(1.5))
                print(typeof([]))
                print(typeof({}))
                print(typeof(len))
            end"
        ),
        vec!["false", "true", "nullable", "integer", "float", "array", "object", "function"]
    );
}

// === Sequences ===

#[test]
fn len_counts_scalars_elements_and_entries() {
    assert_eq!(
        run_lines(
            "fun main():
                print(len(\"héllo\"))
                print(len([1, 2, 3]))
                print(len({a: 1}))
            end"
        ),
        vec!["5", "3", "1"]
    );
}

#[test]
fn append_mutates_in_place() {
    assert_eq!(
        run("fun main(): xs = [1] append(xs, 2, 3) print(xs) end").trim_end(),
        "[1, 2, 3]"
    );
}

#[test]
fn slice_strings_and_arrays() {
    assert_eq!(
        run_lines(
            "fun main():
                print(slice(\"hello\", 1, 3))
                print(slice([1, 2, 3, 4], 1, 3))
            end"
        ),
        vec!["el", "[2, 3]"]
    );
}

#[test]
fn slice_bounds_are_checked() {
    let err = run_err("fun main(): slice(\"abc\", 1, 9) end");
    assert!(err.contains("slice() start or end out of bounds"), "{err}");
}

#[test]
fn sort_is_in_place_and_orders_mixed_numbers() {
    assert_eq!(
        run("fun main(): xs = [3, 1.5, 2] sort(xs) print(xs) end").trim_end(),
        "[1.5, 2, 3]"
    );
}

#[test]
fn sort_with_key_function_is_stable() {
    let source = "
fun main():
    words = [\"bb\", \"a\", \"ccc\", \"dd\"]
    sort(words, fun(w): return len(w) end)
    print(words)
end
";
    assert_eq!(run(source).trim_end(), "[\"a\", \"bb\", \"dd\", \"ccc\"]");
}

#[test]
fn range_laws() {
    assert_eq!(
        run_lines(
            "fun main():
                print(range(3))
                print(range(1, 4))
                print(range(4, 1))
                print(len(range(2, 7)))
            end"
        ),
        vec!["[0, 1, 2]", "[1, 2, 3]", "[]", "5"]
    );
}

#[test]
fn find_and_contains() {
    assert_eq!(
        run_lines(
            "fun main():
                print(find(\"hello\", \"ell\"))
                print(find(\"hello\", \"zz\"))
                print(find([10, 20], 20))
                print(contains(\"hello\", \"ell\"))
                print(contains([1, 2], 3))
            end"
        ),
        vec!["1", "-1", "1", "true", "false"]
    );
}

#[test]
fn join_uses_canonical_quoted_forms() {
    assert_eq!(
        run_lines(
            "fun main():
                print(join([1, 2, 3], \"-\"))
                print(join([\"a\", \"b\"], \",\"))
            end"
        ),
        vec!["1-2-3", "\"a\",\"b\""]
    );
}

#[test]
fn split_on_separator_and_whitespace() {
    assert_eq!(
        run_lines(
            "fun main():
                print(split(\"a,b,c\", \",\"))
                print(split(\"  one   two  \"))
                print(split(\"one two\", null))
                print(split(\"ab\", \"\"))
            end"
        ),
        vec![
            "[\"a\", \"b\", \"c\"]",
            "[\"one\", \"two\"]",
            "[\"one\", \"two\"]",
            "[\"a\", \"b\"]"
        ]
    );
}

#[test]
fn char_and_rune_are_inverses() {
    assert_eq!(
        run_lines(
            "fun main():
                print(char(97))
                print(rune(\"a\"))
                print(rune(char(955)))
            end"
        ),
        vec!["a", "97", "955"]
    );
}

#[test]
fn rune_requires_exactly_one_character() {
    let err = run_err("fun main(): rune(\"ab\") end");
    assert!(err.contains("rune() requires a 1-character string"), "{err}");
}

// === Strings ===

#[test]
fn case_and_padding() {
    assert_eq!(
        run_lines(
            "fun main():
                print(upper(\"héllo\"))
                print(lower(\"WORLD\"))
                print(str_pad(\"ab\", 3, \".\"))
            end"
        ),
        vec!["HÉLLO", "world", "ab..."]
    );
}

#[test]
fn regex_matching() {
    assert_eq!(
        run_lines(
            "fun main():
                print(is_regex_match(\"^-?\\\\d+$\", \"-42\"))
                print(is_regex_match(\"^a+$\", \"bbb\"))
                print(is_regex_match(\"(unclosed\", \"x\"))
            end"
        ),
        vec!["true", "false", "false"]
    );
}

// === Date ===

#[test]
fn date_now_is_rfc3339_utc() {
    let output = run("fun main(): print(date_now()) end");
    let stamp = output.trim_end();
    assert!(stamp.ends_with('Z'), "{stamp}");
    assert!(stamp.contains('T'), "{stamp}");
}

#[test]
fn date_format_substitutes_tokens() {
    assert_eq!(
        run_lines(
            "fun main():
                print(date_format(\"2020-01-02T15:04:05Z\", \"YYYY-MM-DD hh:mm:ss\"))
                print(date_format(\"2020-01-02T15:04:05Z\", \"ee EE nn NN\"))
                print(date_format(\"not a date\", \"YYYY\"))
            end"
        ),
        vec![
            "2020-01-02 15:04:05",
            "Thu Thursday Jan January",
            "null"
        ]
    );
}

// === Math ===

#[test]
fn elementary_math() {
    assert_eq!(
        run_lines(
            "fun main():
                print(abs(-3))
                print(abs(-2.5))
                print(max(1, 7, 3))
                print(max([4, 9, 2]))
                print(min(5, 2))
                print(pow(2, 10))
                print(pow(2.0, 0.5) > 1.41)
                print(sqrt(16))
                print(cbrt(27))
            end"
        ),
        vec!["3", "2.5", "7", "9", "2", "1024", "true", "4", "3"]
    );
}

#[test]
fn sqrt_of_negative_is_a_value_error() {
    let err = run_err("fun main(): sqrt(-1) end");
    assert!(err.contains("sqrt() of negative number"), "{err}");
}

#[test]
fn rounding_family() {
    assert_eq!(
        run_lines(
            "fun main():
                print(round(2.5))
                print(round(2.4))
                print(round(3.14159, 2))
                print(floor(2.9))
                print(ceil(2.1))
                print(trunc(-2.7))
            end"
        ),
        vec!["3", "2", "3.14", "2", "3", "-2"]
    );
}

#[test]
fn trig_and_log_domain_checks() {
    let err = run_err("fun main(): asin(2) end");
    assert!(err.contains("asin() input must be between -1 and 1"), "{err}");
    let err = run_err("fun main(): log(0) end");
    assert!(err.contains("log() of non-positive number"), "{err}");
    let err = run_err("fun main(): logb(8, 1) end");
    assert!(err.contains("logb() base must be positive and not equal to 1"), "{err}");
}

#[test]
fn trig_identities_hold_roughly() {
    assert_eq!(
        run_lines(
            "fun main():
                print(abs(sin(PI)) < 0.0000001)
                print(cos(0))
                print(abs(tan(PI / 4) - 1) < 0.0000001)
                print(abs(atan2(1, 1) - PI / 4) < 0.0000001)
                print(abs(logb(8, 2) - 3) < 0.0000001)
                print(exp(0))
                print(exp2(10))
            end"
        ),
        vec!["true", "1", "true", "true", "true", "1", "1024"]
    );
}

// === Statistics ===

#[test]
fn statistics_over_numeric_arrays() {
    assert_eq!(
        run_lines(
            "fun main():
                print(sum([1, 2, 3]))
                print(sum([1, 2.5]))
                print(mean([1, 2, 3]))
                print(median([3, 1, 2]))
                print(median([1, 2, 3, 4]))
                print(mode([1, 2, 2, 3]))
                print(variance([2, 4, 4, 4, 5, 5, 7, 9]))
                print(std_dev([1]))
            end"
        ),
        vec!["6", "3.5", "2", "2", "2.5", "2", "4.571428571428571", "0"]
    );
}

#[test]
fn statistics_reject_empty_and_non_numeric_arrays() {
    let err = run_err("fun main(): mean([]) end");
    assert!(err.contains("mean() of empty array"), "{err}");
    let err = run_err("fun main(): sum([1, \"x\"]) end");
    assert!(err.contains("sum() array must contain only numbers"), "{err}");
}

// === Number theory ===

#[test]
fn number_theory_basics() {
    assert_eq!(
        run_lines(
            "fun main():
                print(gcd(12, 18))
                print(lcm(4, 6))
                print(factorial(5))
                print(fibonacci(10))
                print(is_prime(97))
                print(is_prime(1))
                print(prime_factors(84))
            end"
        ),
        vec!["6", "12", "120", "55", "true", "false", "[2, 2, 3, 7]"]
    );
}

#[test]
fn factorial_and_fibonacci_limits() {
    let err = run_err("fun main(): factorial(21) end");
    assert!(err.contains("factorial() argument too large (max 20)"), "{err}");
    let err = run_err("fun main(): fibonacci(93) end");
    assert!(err.contains("fibonacci() argument too large (max 92)"), "{err}");
}

// === Random ===

#[test]
fn seeded_random_is_reproducible_within_a_run() {
    let source = "
fun main():
    seed_random(42)
    a = [random(), random_int(0, 100), random_float(0.0, 1.0)]
    seed_random(42)
    b = [random(), random_int(0, 100), random_float(0.0, 1.0)]
    print(a == b)
    r = random()
    print(r >= 0.0 and r < 1.0)
    n = random_int(5, 10)
    print(n >= 5 and n < 10)
end
";
    assert_eq!(run_lines(source), vec!["true", "true", "true"]);
}

#[test]
fn shuffle_and_choice_preserve_elements() {
    let source = "
fun main():
    seed_random(7)
    xs = range(10)
    shuffle(xs)
    sort(xs)
    print(xs == range(10))
    print(contains([1, 2, 3], random_choice([1, 2, 3])))
end
";
    assert_eq!(run_lines(source), vec!["true", "true"]);
}

#[test]
fn random_int_requires_min_below_max() {
    let err = run_err("fun main(): random_int(5, 5) end");
    assert!(err.contains("random_int() min must be less than max"), "{err}");
}

// === Utility ===

#[test]
fn utility_functions() {
    assert_eq!(
        run_lines(
            "fun main():
                print(sign(-7))
                print(sign(0))
                print(clamp(15, 0, 10))
                print(clamp(0.5, 0.0, 1.0))
                print(lerp(0, 10, 0.5))
                print(abs(degrees(PI) - 180) < 0.0000001)
                print(abs(radians(180) - PI) < 0.0000001)
                print(is_nan(0.0 / 1.0))
                print(is_infinite(1.0))
            end"
        ),
        vec!["-1", "0", "10", "0.5", "5", "true", "true", "false", "false"]
    );
}

#[test]
fn wrong_argument_counts_report_the_builtin_name() {
    let err = run_err("fun main(): len() end");
    assert!(err.contains("len() requires 1 arg, got 0"), "{err}");
    let err = run_err("fun main(): pow(2) end");
    assert!(err.contains("pow() requires 2 args, got 1"), "{err}");
}
