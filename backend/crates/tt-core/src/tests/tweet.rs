use crate::Tweet;
use crate::tests::tags;

use googletest::assert_that;
use googletest::prelude::eq;

#[test]
fn given_tweet_when_rendered_then_recipient_sender_body_origin() {
    // Given
    let tweet = Tweet::new(1, "bob", "hello", tags("#news#sports"));

    // When
    let rendered = tweet.render_for("alice", &tweet.hashtags[0]);

    // Then
    assert_that!(rendered.as_str(), eq("alice bob: hello #news"));
}

#[test]
fn given_tweet_when_first_hashtag_then_sender_order_kept() {
    let tweet = Tweet::new(7, "bob", "hi", tags("#sports#news"));
    assert_that!(tweet.first_hashtag().map(|t| t.as_str()), eq(Some("sports")));
}
