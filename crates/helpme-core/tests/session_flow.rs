use std::time::{Duration, Instant};

use helpme_core::avatar::NEUTRAL;
use helpme_core::chat::Sender;
use helpme_core::content::PARTNER_GREETING;
use helpme_core::{
    Outcome, Rejection, Router, Screen, TagSelection, Timings, Transition, TrustLevel,
};

fn router() -> Router {
    Router::with_timings(Timings::default(), 42)
}

#[test]
fn onboarding_reaches_home() {
    let mut router = router();

    let mut screens = vec![router.screen()];
    for _ in 0..4 {
        router.dispatch(Transition::Advance);
        screens.push(router.screen());
    }
    assert_eq!(
        screens,
        vec![
            Screen::Welcome,
            Screen::Philosophy,
            Screen::Philosophy,
            Screen::Philosophy,
            Screen::ProfileSetup,
        ]
    );

    let mut interests = TagSelection::capped(5);
    interests.toggle("Teknoloji");
    interests.toggle("Müzik");
    let outcome = router.dispatch(Transition::CompleteProfile {
        interests: interests.to_vec(),
    });

    assert_eq!(
        outcome,
        Outcome::Moved {
            from: Screen::ProfileSetup,
            to: Screen::Home
        }
    );
    assert_eq!(router.state().interests, vec!["Teknoloji", "Müzik"]);
}

#[test]
fn empty_profile_stays_on_setup() {
    let mut router = router();
    for _ in 0..4 {
        router.dispatch(Transition::Advance);
    }
    let outcome = router.dispatch(Transition::CompleteProfile { interests: vec![] });
    assert_eq!(outcome, Outcome::Rejected(Rejection::NoInterests));
    assert_eq!(router.screen(), Screen::ProfileSetup);
}

#[test]
fn help_request_is_matched_then_chats() {
    let mut router = router();
    let start = Instant::now();
    for _ in 0..4 {
        router.dispatch_at(Transition::Advance, start);
    }
    router.dispatch_at(
        Transition::CompleteProfile {
            interests: vec!["Felsefe".to_string()],
        },
        start,
    );
    router.dispatch_at(Transition::AskHelp, start);

    // Nothing typed yet
    let refused = router.dispatch_at(
        Transition::SendQuestion {
            question: String::new(),
            tags: vec!["Kariyer".to_string()],
        },
        start,
    );
    assert!(refused.is_rejected());
    assert_eq!(router.screen(), Screen::AskHelp);

    router.dispatch_at(
        Transition::SendQuestion {
            question: "Yardım lazım".to_string(),
            tags: vec!["Kariyer".to_string()],
        },
        start,
    );
    assert_eq!(router.screen(), Screen::Waiting);
    assert!(router.tick(start + Duration::from_secs(4)).is_empty());

    router.tick(start + Duration::from_secs(5));
    assert_eq!(router.screen(), Screen::Chat);

    let chat = router.state().chat().expect("chat is open");
    assert_eq!(chat.messages().len(), 1);
    assert_eq!(chat.messages()[0].text, PARTNER_GREETING);

    // Anonymous partner: neutral avatar, no name
    let trust = router.state().trust_level;
    assert_eq!(router.state().partner.avatar(trust).color, NEUTRAL);
    assert_eq!(trust.partner_name(router.state().partner.seed), "Anonim");

    let sent_at = start + Duration::from_secs(6);
    router.dispatch_at(
        Transition::SendMessage {
            text: "Kariyerimi değiştirmek istiyorum".to_string(),
        },
        sent_at,
    );
    assert!(router.state().chat().unwrap().is_partner_typing());

    router.tick(sent_at + Duration::from_secs(2));
    let chat = router.state().chat().unwrap();
    assert!(!chat.is_partner_typing());
    assert_eq!(chat.messages().len(), 3);
    assert_eq!(chat.messages()[1].sender, Sender::Me);
    assert_eq!(chat.messages()[2].sender, Sender::Partner);
}

#[test]
fn long_conversation_raises_trust_once() {
    let mut router = router();
    let mut now = Instant::now();
    for _ in 0..4 {
        router.dispatch_at(Transition::Advance, now);
    }
    router.dispatch_at(
        Transition::CompleteProfile {
            interests: vec!["Doğa".to_string()],
        },
        now,
    );
    router.dispatch_at(Transition::OpenLibrary, now);
    router.dispatch_at(Transition::SelectPerson { id: 1 }, now);
    assert_eq!(router.screen(), Screen::Chat);

    for _ in 0..4 {
        router.dispatch_at(
            Transition::SendMessage {
                text: "devam".to_string(),
            },
            now,
        );
        now += Duration::from_secs(2);
        router.tick(now);
    }
    assert!(router.state().trust_level.is_anonymous());

    now += Duration::from_secs(2);
    router.tick(now);
    assert_eq!(router.state().trust_level, TrustLevel::new(1));
    assert!(router.state().overlays.level_up_visible());
    assert_ne!(
        router.state().partner.avatar(router.state().trust_level).color,
        NEUTRAL
    );

    // Once trusted, further messages never raise it again
    router.dispatch(Transition::DismissLevelUp);
    for _ in 0..6 {
        router.dispatch_at(
            Transition::SendMessage {
                text: "devam".to_string(),
            },
            now,
        );
        now += Duration::from_secs(5);
        router.tick(now);
    }
    assert_eq!(router.state().trust_level, TrustLevel::new(1));
}
