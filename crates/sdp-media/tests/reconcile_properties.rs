//! Property tests for format list reconciliation

use proptest::prelude::*;
use rvoip_sdp_media::{reconcile, FormatList, MediaStream, Reconciliation};

fn format_token() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["alaw", "mulaw", "g729", "gsm", "ilbc", "speex", "g722", "opus"])
        .prop_map(str::to_string)
}

fn format_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(format_token(), 0..6)
}

proptest! {
    #[test]
    fn unforced_answers_never_add_formats(current in format_list(), offered in format_list()) {
        prop_assume!(!current.is_empty());
        let current_list: FormatList = current.iter().cloned().collect();
        let raw = offered.join(",");

        if let Reconciliation::Accepted(accepted) = reconcile(&current_list, &raw, false) {
            prop_assert!(!accepted.is_empty());
            let current_text = current_list.join();
            for format in accepted.iter() {
                prop_assert!(current_text.contains(format));
            }
        }
    }

    #[test]
    fn accepted_lists_keep_offered_order(current in format_list(), offered in format_list()) {
        let current_list: FormatList = current.iter().cloned().collect();
        let raw = offered.join(",");

        if let Reconciliation::Accepted(accepted) = reconcile(&current_list, &raw, false) {
            let mut offered_iter = offered.iter();
            for format in accepted.iter() {
                prop_assert!(offered_iter.any(|o| o == format));
            }
        }
    }

    #[test]
    fn forced_non_empty_offers_win(current in format_list(), offered in format_list()) {
        prop_assume!(!offered.is_empty());
        let mut stream = MediaStream::new("audio", "RTP/AVP", &current.join(","), None, None);
        stream.negotiate(&offered.join(","), None, None, true);
        prop_assert_eq!(stream.formats(), offered.join(","));
        prop_assert_eq!(stream.format(), offered[0].as_str());
    }

    #[test]
    fn selected_format_belongs_to_list(
        initial in format_list(),
        rounds in prop::collection::vec((format_list(), any::<bool>()), 0..8),
    ) {
        let mut stream = MediaStream::new("audio", "RTP/AVP", &initial.join(","), None, None);
        for (offered, force) in rounds {
            stream.negotiate(&offered.join(","), None, None, force);
            let list = stream.format_list();
            prop_assert!(
                (list.is_empty() && stream.format().is_empty())
                    || list.contains_token(stream.format())
            );
        }
    }
}
