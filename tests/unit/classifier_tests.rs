/*!
 * Unit tests for the line classifier rule cascade
 */

use screenwright::formatting::{
    ClassificationContext, ClassificationResult, ElementType, LineClassifier,
};

/// Classify a line at document start.
fn classify(line: &str) -> ClassificationResult {
    LineClassifier::new().classify(line, &ClassificationContext::start())
}

/// Classify a line following an element of the given type.
fn classify_after(line: &str, previous: ElementType) -> ClassificationResult {
    LineClassifier::new().classify(line, &ClassificationContext::after(previous))
}

/// Test that a lowercase heading with a time of day is canonicalized
#[test]
fn test_classify_withLowercaseHeading_shouldCanonicalize() {
    let result = classify("int. kitchen - day");
    assert_eq!(result.element_type, ElementType::SceneHeading);
    assert_eq!(result.text, "INT. KITCHEN - DAY");
    assert!(result.modified);
    assert!(result.warning.is_none());
}

/// Test that a dual-location heading gets the canonical token and a dash before the time
#[test]
fn test_classify_withDualLocationHeading_shouldInsertDash() {
    let result = classify("int/ext garage night");
    assert_eq!(result.element_type, ElementType::SceneHeading);
    assert_eq!(result.text, "INT./EXT. GARAGE - NIGHT");

    let abbreviated = classify("i/e barn - dusk");
    assert_eq!(abbreviated.element_type, ElementType::SceneHeading);
    assert_eq!(abbreviated.text, "INT./EXT. BARN - DUSK");
}

/// Test that every word of the time vocabulary is recognized as a heading time
#[test]
fn test_classify_withTimeVocabulary_shouldSplitLocationAndTime() {
    for time in ["day", "night", "morning", "evening", "noon", "dawn", "dusk", "later", "continuous"] {
        let result = classify(&format!("ext. parking lot {}", time));
        assert_eq!(result.element_type, ElementType::SceneHeading);
        assert_eq!(result.text, format!("EXT. PARKING LOT - {}", time.to_uppercase()));
    }
}

/// Test that a finalized heading without a time of day keeps its text but suggests a suffix
#[test]
fn test_classify_withHeadingMissingTime_whenFinalized_shouldSuggestSuffix() {
    let context = ClassificationContext::start().finalized();
    let result = LineClassifier::new().classify("int. warehouse", &context);

    assert_eq!(result.element_type, ElementType::SceneHeading);
    assert_eq!(result.text, "INT. WAREHOUSE");
    assert_eq!(result.suggested_suffix.as_deref(), Some(" - DAY"));
    assert!(result.warning.is_some());
}

/// Test that a provisional heading without a time of day is left alone
#[test]
fn test_classify_withHeadingMissingTime_whileTyping_shouldNotSuggest() {
    let result = classify("int. warehouse");
    assert_eq!(result.element_type, ElementType::SceneHeading);
    assert_eq!(result.text, "INT. WAREHOUSE");
    assert!(result.suggested_suffix.is_none());
    assert!(result.warning.is_none());
}

/// Test that the suggested time of day can be reconfigured
#[test]
fn test_classify_withCustomTimeOfDay_shouldSuggestIt() {
    let classifier = LineClassifier::new().with_time_of_day("night");
    let context = ClassificationContext::start().finalized();
    let result = classifier.classify("int. alley", &context);
    assert_eq!(result.suggested_suffix.as_deref(), Some(" - NIGHT"));
}

/// Test that a heading reduced to its opener token carries a warning
#[test]
fn test_classify_withBareOpenerToken_shouldWarnMissingLocation() {
    let result = classify("INT.");
    assert_eq!(result.element_type, ElementType::SceneHeading);
    assert_eq!(result.text, "INT.");
    assert!(result.warning.is_some());
}

/// Test that words merely starting with a scene token are not headings
#[test]
fn test_classify_withWordStartingLikeOpener_shouldNotBeHeading() {
    let result = classify("Into the woods they go.");
    assert_eq!(result.element_type, ElementType::Action);

    let interior = classify("Interior decorating is her passion.");
    assert_eq!(interior.element_type, ElementType::Action);
}

/// Test that a colon after a scene token does not read as a heading
#[test]
fn test_classify_withColonAfterOpener_shouldNotBeHeading() {
    let result = classify("int: kitchen - day");
    assert_eq!(result.element_type, ElementType::Action);
    assert_eq!(result.text, "Int: kitchen - day");
}

/// Test that a slash after a scene token still reads as a heading
#[test]
fn test_classify_withSlashAfterOpener_shouldStillBeHeading() {
    let result = classify("int/ kitchen - day");
    assert_eq!(result.element_type, ElementType::SceneHeading);
    assert_eq!(result.text, "INT. KITCHEN - DAY");
}

/// Test that an unclosed parenthetical gets its closing paren appended
#[test]
fn test_classify_withUnclosedParenthetical_shouldAppendParen() {
    let result = classify("(whisper");
    assert_eq!(result.element_type, ElementType::Parenthetical);
    assert_eq!(result.text, "(whisper)");
    assert!(result.modified);
}

/// Test that a balanced parenthetical is not double-closed
#[test]
fn test_classify_withClosedParenthetical_shouldLeaveItAlone() {
    let result = classify("(beat)");
    assert_eq!(result.element_type, ElementType::Parenthetical);
    assert_eq!(result.text, "(beat)");
    assert!(!result.modified);
}

/// Test that a line ending in a colon becomes an uppercased transition
#[test]
fn test_classify_withTerminalColon_shouldBeTransition() {
    let result = classify("cut to:");
    assert_eq!(result.element_type, ElementType::Transition);
    assert_eq!(result.text, "CUT TO:");

    let dissolve = classify("slow dissolve to:");
    assert_eq!(dissolve.element_type, ElementType::Transition);
    assert_eq!(dissolve.text, "SLOW DISSOLVE TO:");
}

/// Test that the same words without the colon fall through to sentence-cased action
#[test]
fn test_classify_withoutTerminalColon_shouldFallToAction() {
    let result = classify("cut to");
    assert_eq!(result.element_type, ElementType::Action);
    assert_eq!(result.text, "Cut to");
}

/// Test that foreign punctuation before the colon disqualifies a transition
#[test]
fn test_classify_withPunctuationBeforeColon_shouldNotBeTransition() {
    let result = classify("note: check [this]:");
    assert_eq!(result.element_type, ElementType::Action);
}

/// Test that camera-direction openers produce uppercased shots
#[test]
fn test_classify_withShotOpener_shouldUppercase() {
    let result = classify("angle on the door");
    assert_eq!(result.element_type, ElementType::Shot);
    assert_eq!(result.text, "ANGLE ON THE DOOR");

    let close = classify("close on her hands");
    assert_eq!(close.element_type, ElementType::Shot);
    assert_eq!(close.text, "CLOSE ON HER HANDS");
}

/// Test that a shot word in the middle of a line does not trigger the rule
#[test]
fn test_classify_withShotWordMidLine_shouldNotMatch() {
    let result = classify("the angle changes");
    assert_eq!(result.element_type, ElementType::Action);
    assert_eq!(result.text, "The angle changes");
}

/// Test that a transition outranks a shot when both could match
#[test]
fn test_classify_withTransitionAndShotCandidates_shouldPreferTransition() {
    let transition = classify("back to:");
    assert_eq!(transition.element_type, ElementType::Transition);
    assert_eq!(transition.text, "BACK TO:");

    let shot = classify("back to the house");
    assert_eq!(shot.element_type, ElementType::Shot);
    assert_eq!(shot.text, "BACK TO THE HOUSE");
}

/// Test that bracketed text is rewrapped with single-space padding
#[test]
fn test_classify_withCenteredMarkers_shouldRewrapPadding() {
    let result = classify(">THE END<");
    assert_eq!(result.element_type, ElementType::CenteredText);
    assert_eq!(result.text, "> THE END <");

    let padded = classify(">   fin   <");
    assert_eq!(padded.text, "> fin <");
}

/// Test that uppercase cue-shaped lines are characters after action,
/// scene heading, transition, or at document start
#[test]
fn test_classify_withUppercaseCue_shouldMatchInAnyContext() {
    let classifier = LineClassifier::new();
    let contexts = vec![
        ClassificationContext::start(),
        ClassificationContext::after(ElementType::Action),
        ClassificationContext::after(ElementType::SceneHeading),
        ClassificationContext::after(ElementType::Transition),
    ];

    for context in &contexts {
        for cue in ["JOHN", "MARY JANE", "COP 2", "D'ARCY", "MR. SMITH"] {
            let result = classifier.classify(cue, context);
            assert_eq!(result.element_type, ElementType::Character, "cue: {}", cue);
            assert_eq!(result.text, cue);
        }
    }
}

/// Test that cue modifiers are rewritten to their canonical spellings
#[test]
fn test_classify_withCueModifiers_shouldNormalizeSpelling() {
    assert_eq!(classify("JOHN (VO)").text, "JOHN V.O.");
    assert_eq!(classify("SARAH O. S.").text, "SARAH O.S.");
    assert_eq!(classify("MARY CONTINUED").text, "MARY CONT'D");
    assert_eq!(classify("JOHN (VO)").element_type, ElementType::Character);
}

/// Test that an immediately repeated modifier collapses to one
#[test]
fn test_classify_withRepeatedModifier_shouldCollapse() {
    let result = classify("JOHN (V.O.) V.O.");
    assert_eq!(result.element_type, ElementType::Character);
    assert_eq!(result.text, "JOHN V.O.");
}

/// Test that a lowercase name in a cue position is promoted to a character cue
#[test]
fn test_classify_withLowercaseNameInCuePosition_shouldUppercase() {
    let after_heading = classify_after("john", ElementType::SceneHeading);
    assert_eq!(after_heading.element_type, ElementType::Character);
    assert_eq!(after_heading.text, "JOHN");

    let after_action = classify_after("sarah", ElementType::Action);
    assert_eq!(after_action.element_type, ElementType::Character);
    assert_eq!(after_action.text, "SARAH");
}

/// Test that the line after a parenthetical joins the open speech
/// instead of starting a new cue
#[test]
fn test_classify_withLowercaseNameAfterParenthetical_shouldStayDialogue() {
    let result = classify_after("john", ElementType::Parenthetical);
    assert_eq!(result.element_type, ElementType::Dialogue);
    assert_eq!(result.text, "john");
}

/// Test that prose in a cue position is not mistaken for a name
#[test]
fn test_classify_withProseInCuePosition_shouldStayAction() {
    let sentence = classify_after("She waits.", ElementType::SceneHeading);
    assert_eq!(sentence.element_type, ElementType::Action);
    assert_eq!(sentence.text, "She waits.");

    let function_words = classify_after("cut to", ElementType::SceneHeading);
    assert_eq!(function_words.element_type, ElementType::Action);

    let article = classify_after("the door", ElementType::Action);
    assert_eq!(article.element_type, ElementType::Action);
}

/// Test that dialogue after a cue or parenthetical keeps its casing
#[test]
fn test_classify_withDialogueAfterCue_shouldPreserveCase() {
    let result = classify_after("hello there", ElementType::Character);
    assert_eq!(result.element_type, ElementType::Dialogue);
    assert_eq!(result.text, "hello there");
    assert!(!result.modified);

    let after_paren = classify_after("Easy. Take it slow.", ElementType::Parenthetical);
    assert_eq!(after_paren.element_type, ElementType::Dialogue);
    assert_eq!(after_paren.text, "Easy. Take it slow.");
}

/// Test that blank and whitespace-only lines return empty action with no change flagged
#[test]
fn test_classify_withBlankLine_shouldReturnEmptyAction() {
    for blank in ["", "   ", "\t  \t"] {
        let result = classify(blank);
        assert_eq!(result.element_type, ElementType::Action);
        assert_eq!(result.text, "");
        assert!(!result.modified);
        assert!(result.suggested_suffix.is_none());
        assert!(result.warning.is_none());
    }
}

/// Test that lines too long or too wordy for a cue fall through to action
#[test]
fn test_classify_withOversizedUppercaseLine_shouldFallToAction() {
    let long = classify("THE ENTIRE ROOM SHAKES AS THE TRAIN PASSES");
    assert_eq!(long.element_type, ElementType::Action);

    let five_words = classify("JOHN PAUL GEORGE RINGO PETE");
    assert_eq!(five_words.element_type, ElementType::Action);
}

/// Test that a name with a trailing colon reads as a transition, not a cue
#[test]
fn test_classify_withTrailingColonOnName_shouldBeTransition() {
    let result = classify("JOHN:");
    assert_eq!(result.element_type, ElementType::Transition);
    assert_eq!(result.text, "JOHN:");
}

/// Test that classifying canonical output again returns it unchanged
#[test]
fn test_classify_onCanonicalOutput_shouldBeIdempotent() {
    let classifier = LineClassifier::new();
    let context = ClassificationContext::start();
    let inputs = [
        "int. kitchen - day",
        "(whisper",
        "cut to:",
        "angle on the door",
        ">THE END<",
        "JOHN (VO)",
        "the kettle shrieks",
    ];

    for input in inputs {
        let first = classifier.classify(input, &context);
        let second = classifier.classify(&first.text, &context);
        assert_eq!(second.text, first.text, "input: {}", input);
        assert_eq!(second.element_type, first.element_type, "input: {}", input);
        assert!(!second.modified, "input: {}", input);
    }
}

/// Test that identical inputs always produce identical results
#[test]
fn test_classify_withIdenticalInputs_shouldBePure() {
    let classifier = LineClassifier::new();
    let context = ClassificationContext::after(ElementType::Action).finalized();

    for line in ["int. kitchen", "john", "(beat", "whatever else"] {
        let first = classifier.classify(line, &context);
        let second = classifier.classify(line, &context);
        assert_eq!(first, second);
    }
}
