use std::time::Duration;

use folio::prelude::*;

fn run() -> Result<PageView> {
    let config = PageConfig::from_json(r#"{ "loading_ms": 100 }"#)?;
    let host = WebHost::new(1024.0, 768.0).with_color_scheme(Theme::Dark);
    host.stack_sections(&[(SectionId::Hero, 768.0), (SectionId::About, 600.0)]);

    let mut page = StepPage::new(config, host)?;
    page.advance_time(Duration::from_millis(100));
    page.step();
    Ok(page.view())
}

#[test]
fn prelude_drives_a_page() {
    let view = run().unwrap();
    assert!(!view.loading);
    assert_eq!(view.theme, Theme::Dark);
    let hero = view
        .sections
        .iter()
        .find(|s| s.id == SectionId::Hero)
        .unwrap();
    assert!(hero.visible);
}

#[test]
fn second_page_on_same_thread_is_rejected() {
    let first = StepPage::new(PageConfig::default(), WebHost::new(800.0, 600.0)).unwrap();
    let second = StepPage::new(PageConfig::default(), WebHost::new(800.0, 600.0));
    let err: Error = second.err().unwrap().into();
    assert!(matches!(err, Error::Theme(folio::ThemeError::AlreadyActive)));
    drop(first);
    assert!(StepPage::new(PageConfig::default(), WebHost::new(800.0, 600.0)).is_ok());
}
