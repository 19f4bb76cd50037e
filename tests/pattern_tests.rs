use riouter::pattern::{
    compile_template, lex, parse, CompiledPattern, KeyName, Matcher, Modifier, PatternError, PatternOptions,
    PatternSource, Segment, TokenKind,
};

fn compile(template: &str) -> CompiledPattern {
    compile_template(template, &PatternOptions::default()).unwrap()
}

fn positional(compiled: &CompiledPattern, path: &str) -> Vec<Option<String>> {
    compiled.exec(path).unwrap().into_vec()
}

#[test]
fn test_parameter_extraction_is_positional() {
    let c = compile("/user/:id/posts/:post");
    assert_eq!(
        positional(&c, "/user/42/posts/hello"),
        vec![Some("42".to_string()), Some("hello".to_string())]
    );
    let names: Vec<String> = c.keys.iter().map(|k| k.name.to_string()).collect();
    assert_eq!(names, vec!["id", "post"]);
}

#[test]
fn test_custom_pattern_constraint() {
    let c = compile(r"/user/:id(\d+)");
    assert!(c.is_match("/user/42"));
    assert!(!c.is_match("/user/abc"));
    assert_eq!(c.keys[0].pattern, r"\d+");
}

#[test]
fn test_modifier_semantics() {
    let optional = compile("/photos/:id?");
    assert!(optional.is_match("/photos"));
    assert!(optional.is_match("/photos/5"));
    assert_eq!(positional(&optional, "/photos"), vec![None]);

    let one_or_more = compile("/files/:path+");
    assert_eq!(
        positional(&one_or_more, "/files/a/b/c"),
        vec![Some("a/b/c".to_string())]
    );
    assert!(!one_or_more.is_match("/files"));

    let zero_or_more = compile("/files/:path*");
    assert!(zero_or_more.is_match("/files"));
    assert!(zero_or_more.is_match("/files/a/b"));
}

#[test]
fn test_anonymous_groups_are_indexed() {
    let c = compile(r"/(\d+)/:name/(.*)");
    let names: Vec<KeyName> = c.keys.iter().map(|k| k.name.clone()).collect();
    assert_eq!(
        names,
        vec![KeyName::Index(0), KeyName::from("name"), KeyName::Index(1)]
    );
    let result = c.match_params("/12/ann/rest/of/it").unwrap();
    assert_eq!(result.params[&KeyName::Index(1)], "rest/of/it");
}

#[test]
fn test_syntax_errors_carry_positions() {
    let err = compile_template("(?:abc)", &PatternOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        PatternError::PatternStartsWithQuestion { index: 1 }
    ));
    assert_eq!(err.index(), Some(1));

    let err = compile_template(":", &PatternOptions::default()).unwrap_err();
    assert!(matches!(err, PatternError::MissingParameterName { index: 0 }));

    let err = compile_template("/a(b", &PatternOptions::default()).unwrap_err();
    assert!(matches!(err, PatternError::UnbalancedPattern { .. }));

    let err = compile_template("/a{b", &PatternOptions::default()).unwrap_err();
    match err {
        PatternError::UnexpectedToken {
            found, expected, ..
        } => {
            assert_eq!(found, TokenKind::End);
            assert_eq!(expected, TokenKind::Close);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lex_and_parse_are_public_stages() {
    let tokens = lex("/:id?").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Char,
            TokenKind::Name,
            TokenKind::Modifier,
            TokenKind::End
        ]
    );

    let segments = parse("/:id?", &PatternOptions::default()).unwrap();
    match &segments[..] {
        [Segment::Param(param)] => {
            assert_eq!(param.prefix, "/");
            assert_eq!(param.modifier, Modifier::Optional);
        }
        other => panic!("unexpected segments: {other:?}"),
    }
}

#[test]
fn test_template_lists_and_precompiled_sources() {
    let list = PatternSource::from(vec!["/a/:x", "/b/:y"]);
    let c = CompiledPattern::compile(&list, &PatternOptions::default()).unwrap();
    assert!(c.is_match("/a/1"));
    assert!(c.is_match("/b/2"));
    assert!(!c.is_match("/c/3"));
    assert_eq!(c.keys.len(), 2);

    let precompiled = PatternSource::from(Matcher::from(regex::Regex::new(r"^/v(\d+)/(?P<rest>.*)$").unwrap()));
    let c = CompiledPattern::compile(&precompiled, &PatternOptions::default()).unwrap();
    let result = c.match_params("/v2/things").unwrap();
    assert_eq!(result.params[&KeyName::Index(0)], "2");
    assert_eq!(result.params[&KeyName::from("rest")], "things");
}
