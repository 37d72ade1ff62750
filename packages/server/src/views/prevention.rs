use maud::{Markup, html};
use ticksight_server_models::Page;

use super::layout::page;

const TIPS: &[(&str, &[&str])] = &[
    (
        "Before you go out",
        &[
            "Wear long trousers tucked into socks and long-sleeved tops in long grass, bracken and woodland.",
            "Light-coloured clothing makes ticks easier to spot.",
            "Use an insect repellent that is effective against ticks.",
        ],
    ),
    (
        "While you are outdoors",
        &[
            "Keep to clear paths and avoid brushing against vegetation.",
            "Check pets regularly, especially around the ears, neck and legs.",
        ],
    ),
    (
        "When you get home",
        &[
            "Check your whole body, including the scalp, armpits, groin and behind the knees.",
            "Check children carefully, paying attention to the head and neck.",
            "Shower and wash outdoor clothing at a high temperature.",
        ],
    ),
    (
        "Removing a tick",
        &[
            "Use fine-tipped tweezers or a tick removal tool.",
            "Grip the tick as close to the skin as possible and pull upwards slowly and firmly.",
            "Clean the bite with antiseptic or soap and water.",
            "Do not crush the tick, burn it or cover it with creams or oils.",
        ],
    ),
    (
        "After a bite",
        &[
            "Note the date and where you were; you can report it as a sighting.",
            "Watch for a spreading red rash or flu-like symptoms over the following weeks and contact your GP if they appear.",
        ],
    ),
];

pub fn prevention() -> Markup {
    page(
        "Tick Prevention Tips",
        Page::Prevention,
        None,
        html! {
            h1 { "Tick prevention tips" }
            p class="lead" {
                "Most tick bites are harmless, but some ticks carry infections such as Lyme disease. "
                "A few simple habits greatly reduce the risk."
            }
            div class="cards" {
                @for (heading, items) in TIPS {
                    section class="card" {
                        h2 { (heading) }
                        ul {
                            @for item in *items {
                                li { (item) }
                            }
                        }
                    }
                }
            }
            p {
                "Seen a tick? "
                a href="/?page=report" { "Report your sighting" }
                " to help map tick activity across the UK."
            }
        },
    )
}
