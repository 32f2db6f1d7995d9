use scroll_choreo::{Axis, ChoreoConfig, Section, SectionChange, SectionKind};
use yew::prelude::*;

use crate::components::stage::{Preset, ScrollStage, SectionView};
use crate::pages::common::{set_document_title, slide, SLIDE_STYLE};

pub fn config(axis: Axis) -> ChoreoConfig {
    let mut config = ChoreoConfig::default().with_axis(axis);
    config.parallax = 0.18;
    config.easing.wheel = 0.12;
    config.easing.trackpad = 0.07;
    config
}

fn slides() -> Vec<Section> {
    vec![
        Section::new(0, SectionKind::Video)
            .src("/assets/about/hands.mp4")
            .background("#0b0b0b"),
        Section::new(1, SectionKind::TextSection)
            .title("Small studio, long memory")
            .body("Twelve people who would rather ship one thing properly than ten things on time.")
            .background("#0b0b0b"),
        Section::new(2, SectionKind::Media)
            .src("/assets/about/studio.webp")
            .title("The studio")
            .background("#1a1714"),
        Section::new(3, SectionKind::Text)
            .title("How we work")
            .body("Strategy, design and engineering sit at the same table from the first call.")
            .background("#f2ede4"),
        Section::new(4, SectionKind::Media)
            .src("/assets/about/team.webp")
            .title("The team")
            .background("#f2ede4"),
    ]
}

const TITLES: [&str; 5] = ["About", "About: Who we are", "About: The studio", "About: How we work", "About: The team"];

#[function_component(About)]
pub fn about() -> Html {
    let sections = use_memo(|_| slides(), ());

    {
        use_effect_with_deps(
            move |_| {
                set_document_title(TITLES[0]);
                || ()
            },
            (),
        );
    }

    let on_section_change = Callback::from(|change: SectionChange| {
        set_document_title(TITLES.get(change.current).copied().unwrap_or(TITLES[0]));
    });

    let render = Callback::from(|view: SectionView| slide(&view));

    html! {
        <div class="about-page">
            <style>{SLIDE_STYLE}</style>
            <ScrollStage
                title={"We are Northlight".to_string()}
                sections={sections}
                preset={Preset::About}
                render={render}
                on_section_change={on_section_change}
                poster={Some("/assets/about/hands-poster.webp".to_string())}
            />
        </div>
    }
}
