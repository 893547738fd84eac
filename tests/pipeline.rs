use mindfa::{Automaton, MinimizeOptions, Seeding, StateSet, Symbol};

fn set(states: &[usize]) -> StateSet {
    states.iter().cloned().collect()
}

fn run(text: &str) -> (Automaton, Automaton, Automaton) {
    let mut nfa: Automaton = text.parse().unwrap();
    let original = nfa.clone();
    nfa.saturate_epsilon();
    let dfa = nfa.determinize().unwrap();
    let min = dfa.minimize().unwrap();
    (original, dfa, min)
}

#[test]
fn epsilon_scenario() {
    let mut nfa: Automaton = "3\nfinal 2\ntrans 0 a 1\ntrans 1 b 2\ntrans 0 e 1\n".parse().unwrap();
    nfa.saturate_epsilon();
    assert_eq!(nfa.targets(0, Symbol::Epsilon), Some(&set(&[1])));

    let det = nfa.powerset_construction().unwrap();
    assert_eq!(det.subsets[0], set(&[0, 1]));
    assert!(det.dfa.is_deterministic());
    assert!(det.dfa.accepts("ab"));
    assert!(det.dfa.accepts("b"));
    assert!(!det.dfa.accepts(""));
    assert!(!det.dfa.accepts("a"));
    assert!(!det.dfa.accepts("ba"));
    assert!((0..det.dfa.state_count()).any(|s| !det.dfa.is_accepting(s)));

    let min = det.dfa.minimize().unwrap();
    assert!(min.state_count() <= det.dfa.state_count());
    for word in &["", "a", "b", "ab", "ba", "abb", "bb"] {
        assert_eq!(min.accepts(word), nfa.accepts(word), "{}", word);
    }
}

#[test]
fn equivalent_accepting_states_merge() {
    // 1 and 2 accept and behave identically
    let (_, _, min) = run("4 final 1 final 2 trans 0 a 1 trans 0 b 2 trans 1 c 3 trans 2 c 3 final 3");
    // {0}, {1, 2}, {3}
    assert_eq!(min.state_count(), 3);

    let aut: Automaton = "3 final 1 final 2 trans 0 a 1 trans 0 b 2 trans 1 a 1 trans 2 a 2"
        .parse()
        .unwrap();
    assert_eq!(aut.minimize().unwrap().state_count(), 2);
    let split = MinimizeOptions { seeding: Seeding::SplitAccepting };
    assert_eq!(aut.minimize_with(&split).unwrap().state_count(), 3);
}

#[test]
fn language_is_preserved_through_the_pipeline() {
    // (a|b)* a b, with an epsilon detour
    let text = "5 final 4 \
                trans 0 a 0 trans 0 b 0 trans 0 e 1 \
                trans 1 a 2 trans 2 e 3 trans 3 b 4";
    let (nfa, dfa, min) = run(text);
    assert!(dfa.is_deterministic());
    assert!(min.is_deterministic());
    assert_eq!(min.state_count(), 3);

    let mut words = vec![String::new()];
    for len in 1..=6 {
        for bits in 0..(1u32 << len) {
            words.push(
                (0..len)
                    .map(|i| if bits & (1 << i) == 0 { 'a' } else { 'b' })
                    .collect(),
            );
        }
    }
    for word in &words {
        let expected = word.ends_with("ab");
        assert_eq!(nfa.accepts(word), expected, "{}", word);
        assert_eq!(dfa.accepts(word), expected, "{}", word);
        assert_eq!(min.accepts(word), expected, "{}", word);
    }
}

#[test]
fn diagram_has_one_line_per_edge_and_accepting_state() {
    let (nfa, _, min) = run("4 final 3 final 1 trans 0 a 1 trans 0 a 2 trans 2 b 3 trans 1 e 2");
    for aut in &[nfa, min] {
        let dot = aut.to_string();
        let edge_lines = dot.lines().filter(|l| l.contains(" -> ")).count();
        assert_eq!(edge_lines, aut.edges().count());

        let finals_line = dot
            .lines()
            .find(|l| l.starts_with("node [shape=doublecircle]"))
            .unwrap();
        let declared: Vec<usize> = finals_line
            .trim_start_matches("node [shape=doublecircle];")
            .trim_end_matches(';')
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(declared, aut.accepting().iter().collect::<Vec<_>>());
        assert!(dot.starts_with("digraph {\nrankdir=LR;\n"));
        assert!(dot.ends_with("}\n"));
    }
}

#[test]
fn malformed_descriptions_never_reach_the_algorithms() {
    assert!("3 trans 0 a 3".parse::<Automaton>().is_err());
    assert!("3 final -1".parse::<Automaton>().is_err());
    assert!("3 trans 0 a".parse::<Automaton>().is_err());
    assert!("3 start 0".parse::<Automaton>().is_err());
    assert!("0".parse::<Automaton>().is_err());
}
